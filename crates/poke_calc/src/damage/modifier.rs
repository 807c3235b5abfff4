//! Damage modifiers and the phases they are folded in.
//!
//! A generation's plan is an ordered list of `ModifierSlot`s. Resolving a plan
//! against a `BattleConditions` yields a `ModifierChain`, whose per-phase lists
//! are folded one step at a time by the damage formula. The order inside a
//! phase is the order the game truncates in.

use super::generations::{GenMechanics, Generation};
use serde::{Deserialize, Serialize};

/// Where in the damage formula a modifier is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierPhase {
    /// Multiplied into the move's power before any truncation.
    RawPower,
    /// Folded into the move's power, truncating after each step.
    BasePower,
    /// Multiplied into the offensive stat without truncation.
    Attack,
    /// Folded into base damage before the random factor.
    PreRandom,
    /// Folded into damage after the random factor.
    PostRandom,
}

/// Which battle condition a slot reads its multiplier from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    /// Torrent, Overgrow, Blaze and Swarm at low health.
    PinchAbility,
    /// Reflect or Light Screen on the defender's side.
    Screen,
    /// Spread move in a double or triple battle.
    MultiTarget,
    WeatherBoost,
    WeatherPenalty,
    /// Caller-supplied base power multiplier.
    OtherPower,
    Critical,
    Stab,
    Effectiveness,
    /// Caller-supplied final multiplier.
    Other,
}

/// One entry of a generation's modifier plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifierSlot {
    pub kind: ModifierKind,
    pub phase: ModifierPhase,
}

impl ModifierSlot {
    pub const fn new(kind: ModifierKind, phase: ModifierPhase) -> Self {
        Self { kind, phase }
    }
}

/// The situational inputs a modifier plan is resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BattleConditions {
    pub stab: bool,
    pub type_effectiveness: f64,
    pub critical_hit: bool,
    pub torrent: bool,
    pub multi_target: bool,
    pub weather_boosted: bool,
    pub weather_reduced: bool,
    pub screen: bool,
    pub other_modifier: f64,
    pub other_power_modifier: f64,
}

impl Default for BattleConditions {
    fn default() -> Self {
        Self {
            stab: false,
            type_effectiveness: 1.0,
            critical_hit: false,
            torrent: false,
            multi_target: false,
            weather_boosted: false,
            weather_reduced: false,
            screen: false,
            other_modifier: 1.0,
            other_power_modifier: 1.0,
        }
    }
}

impl ModifierKind {
    /// The multiplier this kind contributes under `conditions`.
    pub fn value(self, conditions: &BattleConditions, gen: Generation) -> f64 {
        let flag = |on: bool, mult: f64| if on { mult } else { 1.0 };

        match self {
            ModifierKind::PinchAbility => flag(conditions.torrent, 1.5),
            ModifierKind::Screen => {
                // Critical hits bypass screens.
                let base = if conditions.multi_target { 2.0 / 3.0 } else { 0.5 };
                flag(conditions.screen && !conditions.critical_hit, base)
            }
            ModifierKind::MultiTarget => {
                flag(conditions.multi_target, gen.multi_target_modifier())
            }
            ModifierKind::WeatherBoost => flag(conditions.weather_boosted, 1.5),
            ModifierKind::WeatherPenalty => flag(conditions.weather_reduced, 0.5),
            ModifierKind::OtherPower => conditions.other_power_modifier,
            ModifierKind::Critical => flag(conditions.critical_hit, gen.crit_multiplier()),
            ModifierKind::Stab => flag(conditions.stab, 1.5),
            ModifierKind::Effectiveness => conditions.type_effectiveness,
            ModifierKind::Other => conditions.other_modifier,
        }
    }
}

/// A generation plan resolved to concrete multipliers, grouped by phase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierChain {
    pub raw_power: Vec<f64>,
    pub base_power: Vec<f64>,
    pub attack: Vec<f64>,
    pub pre_random: Vec<f64>,
    pub post_random: Vec<f64>,
}

impl ModifierChain {
    /// Resolve `gen`'s plan against `conditions`.
    pub fn resolve(gen: Generation, conditions: &BattleConditions) -> Self {
        let mut chain = ModifierChain::default();

        for slot in gen.modifier_plan() {
            let value = slot.kind.value(conditions, gen);
            let phase = match slot.phase {
                ModifierPhase::RawPower => &mut chain.raw_power,
                ModifierPhase::BasePower => &mut chain.base_power,
                ModifierPhase::Attack => &mut chain.attack,
                ModifierPhase::PreRandom => &mut chain.pre_random,
                ModifierPhase::PostRandom => &mut chain.post_random,
            };
            phase.push(value);
        }

        chain
    }

    /// Move power with the raw-power multipliers applied (not truncated).
    pub fn raw_power(&self, power: f64) -> f64 {
        self.raw_power.iter().fold(power, |acc, m| acc * m)
    }

    /// Offensive stat with the attack multipliers applied (not truncated).
    pub fn attack(&self, attack: f64) -> f64 {
        self.attack.iter().fold(attack, |acc, m| acc * m)
    }
}
