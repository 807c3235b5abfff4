//! Damage ranges across every IV and nature variant.
//!
//! For each variant the 32 IVs are compacted into runs that produce the same
//! stat, and each run is rolled once. The stat formula is non-decreasing in
//! the IV, so a run is always contiguous.

use super::formula::DamageRolls;
use super::generations::{GenMechanics, Generation, StatFormula};
use super::modifier::{BattleConditions, ModifierChain};
use crate::core_data::MAX_IV;
use crate::error::{CalcError, CalcResult};
use crate::iv_ranges::IvRange;
use crate::nature::NatureMap;
use crate::stats::{apply_combat_stages, check_evs, StatInputs, MAX_COMBAT_STAGE, MIN_COMBAT_STAGE};
use serde::{Deserialize, Serialize};

/// Configuration for `calculate_damage_ranges`.
///
/// Mandatory fields are `Option`s so a missing one is reported instead of
/// defaulted. Build one with the setters or deserialize it from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DamageRangeOptions {
    /// Level of the owned creature.
    pub level: Option<u8>,
    /// Base stat of the owned creature's relevant stat.
    pub base_stat: Option<u16>,
    /// EVs in the relevant stat (awakening values in Let's Go).
    pub evs: Option<u16>,
    pub combat_stages: i8,
    /// Whether the owned creature is the attacker.
    pub offensive_mode: bool,
    pub move_power: Option<u16>,
    pub generation: Option<Generation>,
    /// Level of the opponent. Required when defending.
    pub opponent_level: Option<u8>,
    /// The opponent's relevant stat.
    pub opponent_stat: Option<u16>,
    pub opponent_combat_stages: i8,
    /// Required for Let's Go.
    pub friendship: Option<u8>,
    #[serde(flatten)]
    pub conditions: BattleConditions,
}

impl Default for DamageRangeOptions {
    fn default() -> Self {
        Self {
            level: None,
            base_stat: None,
            evs: None,
            combat_stages: 0,
            offensive_mode: true,
            move_power: None,
            generation: None,
            opponent_level: None,
            opponent_stat: None,
            opponent_combat_stages: 0,
            friendship: None,
            conditions: BattleConditions::default(),
        }
    }
}

impl DamageRangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn base_stat(mut self, base_stat: u16) -> Self {
        self.base_stat = Some(base_stat);
        self
    }

    pub fn evs(mut self, evs: u16) -> Self {
        self.evs = Some(evs);
        self
    }

    pub fn combat_stages(mut self, stages: i8) -> Self {
        self.combat_stages = stages;
        self
    }

    /// Owned creature defends; the opponent's level and stat drive the attack.
    pub fn defending(mut self, opponent_level: u8) -> Self {
        self.offensive_mode = false;
        self.opponent_level = Some(opponent_level);
        self
    }

    pub fn move_power(mut self, power: u16) -> Self {
        self.move_power = Some(power);
        self
    }

    pub fn generation(mut self, gen: Generation) -> Self {
        self.generation = Some(gen);
        self
    }

    pub fn opponent_stat(mut self, stat: u16) -> Self {
        self.opponent_stat = Some(stat);
        self
    }

    pub fn opponent_combat_stages(mut self, stages: i8) -> Self {
        self.opponent_combat_stages = stages;
        self
    }

    pub fn friendship(mut self, friendship: u8) -> Self {
        self.friendship = Some(friendship);
        self
    }

    pub fn stab(mut self, stab: bool) -> Self {
        self.conditions.stab = stab;
        self
    }

    pub fn type_effectiveness(mut self, effectiveness: f64) -> Self {
        self.conditions.type_effectiveness = effectiveness;
        self
    }

    pub fn critical_hit(mut self, crit: bool) -> Self {
        self.conditions.critical_hit = crit;
        self
    }

    /// Torrent, Overgrow, Blaze or Swarm is active.
    pub fn torrent(mut self, active: bool) -> Self {
        self.conditions.torrent = active;
        self
    }

    pub fn multi_target(mut self, multi_target: bool) -> Self {
        self.conditions.multi_target = multi_target;
        self
    }

    pub fn weather_boosted(mut self, boosted: bool) -> Self {
        self.conditions.weather_boosted = boosted;
        self
    }

    pub fn weather_reduced(mut self, reduced: bool) -> Self {
        self.conditions.weather_reduced = reduced;
        self
    }

    pub fn screen(mut self, screen: bool) -> Self {
        self.conditions.screen = screen;
        self
    }

    pub fn other_modifier(mut self, modifier: f64) -> Self {
        self.conditions.other_modifier = modifier;
        self
    }

    pub fn other_power_modifier(mut self, modifier: f64) -> Self {
        self.conditions.other_power_modifier = modifier;
        self
    }

    /// Check every field and resolve the mandatory ones.
    pub fn validate(&self) -> CalcResult<DamageRequest> {
        let level = self.level.filter(|&l| l > 0).ok_or(CalcError::missing("level"))?;
        check_level("level", level)?;
        let base_stat = self.base_stat.filter(|&b| b > 0).ok_or(CalcError::missing("baseStat"))?;
        let evs = self.evs.ok_or(CalcError::missing("evs"))?;
        let opponent_stat = self
            .opponent_stat
            .filter(|&s| s > 0)
            .ok_or(CalcError::missing("opponentStat"))?;
        let gen = self.generation.ok_or(CalcError::missing("generation"))?;
        let move_power = self.move_power.filter(|&p| p > 0).ok_or(CalcError::missing("movePower"))?;

        let attacker_level = if self.offensive_mode {
            level
        } else {
            let opponent_level = self
                .opponent_level
                .filter(|&l| l > 0)
                .ok_or(CalcError::missing("opponentLevel"))?;
            check_level("opponentLevel", opponent_level)?;
            opponent_level
        };

        let friendship = match (gen.stat_formula(), self.friendship) {
            (StatFormula::LetsGo, None) => return Err(CalcError::missing("friendship")),
            (_, friendship) => friendship.unwrap_or(0),
        };

        check_evs(gen, evs)?;
        check_stages("combatStages", self.combat_stages)?;
        check_stages("opponentCombatStages", self.opponent_combat_stages)?;
        check_multiplier("typeEffectiveness", self.conditions.type_effectiveness)?;
        check_multiplier("otherModifier", self.conditions.other_modifier)?;
        check_multiplier("otherPowerModifier", self.conditions.other_power_modifier)?;

        Ok(DamageRequest {
            stat: StatInputs {
                level,
                base: base_stat,
                ev: evs,
                gen,
                friendship,
            },
            attacker_level,
            move_power,
            opponent_stat,
            combat_stages: self.combat_stages,
            opponent_combat_stages: self.opponent_combat_stages,
            offensive_mode: self.offensive_mode,
            chain: ModifierChain::resolve(gen, &self.conditions),
        })
    }
}

fn check_level(field: &'static str, level: u8) -> CalcResult<()> {
    if level > 100 {
        return Err(CalcError::invalid(field, format!("{level} is above 100")));
    }
    Ok(())
}

fn check_stages(field: &'static str, stages: i8) -> CalcResult<()> {
    if !(MIN_COMBAT_STAGE..=MAX_COMBAT_STAGE).contains(&stages) {
        return Err(CalcError::invalid(field, format!("{stages} is outside -6..=6")));
    }
    Ok(())
}

fn check_multiplier(field: &'static str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid(field, format!("{value} is not a non-negative number")));
    }
    Ok(())
}

/// A validated damage-range request.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageRequest {
    /// Inputs for the owned creature's stat.
    pub stat: StatInputs,
    pub attacker_level: u8,
    pub move_power: u16,
    pub opponent_stat: u16,
    pub combat_stages: i8,
    pub opponent_combat_stages: i8,
    pub offensive_mode: bool,
    pub chain: ModifierChain,
}

impl DamageRequest {
    /// Roll damage with the owned creature's stat at `stat`.
    pub fn roll(&self, stat: u16) -> DamageRolls {
        // A staged stat never drops below 1.
        let player = apply_combat_stages(stat, self.combat_stages).max(1);
        let opponent = apply_combat_stages(self.opponent_stat, self.opponent_combat_stages).max(1);
        let (attack, defense) = if self.offensive_mode {
            (player, opponent)
        } else {
            (opponent, player)
        };

        self.chain.roll(
            self.attacker_level,
            f64::from(self.move_power),
            f64::from(attack),
            f64::from(defense),
        )
    }
}

/// A maximal run of IVs producing the same stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSegment {
    pub stat: u16,
    pub ivs: IvRange,
}

/// Compact the stats of IVs 0 through 31 into runs of equal value.
///
/// `stat_for_iv` must be non-decreasing in the IV.
pub fn segment_stats(mut stat_for_iv: impl FnMut(u8) -> u16) -> Vec<StatSegment> {
    let mut segments: Vec<StatSegment> = Vec::new();

    for iv in 0..=MAX_IV {
        let stat = stat_for_iv(iv);
        match segments.last_mut() {
            Some(last) if last.stat == stat => last.ivs = last.ivs.extend(iv),
            _ => segments.push(StatSegment {
                stat,
                ivs: IvRange::single(iv),
            }),
        }
    }

    segments
}

/// One stat run with its damage rolls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSegment {
    pub stat: u16,
    pub ivs: IvRange,
    pub damage_values: DamageRolls,
}

impl RangeSegment {
    #[inline]
    pub fn min_damage(&self) -> u32 {
        self.damage_values.iter().copied().min().unwrap_or(0)
    }

    #[inline]
    pub fn max_damage(&self) -> u32 {
        self.damage_values.iter().copied().max().unwrap_or(0)
    }
}

/// Calculate the damage rolls for every IV under each nature variant.
pub fn calculate_damage_ranges(options: &DamageRangeOptions) -> CalcResult<NatureMap<Vec<RangeSegment>>> {
    let request = options.validate()?;

    tracing::debug!(
        gen = %request.stat.gen,
        level = request.stat.level,
        base = request.stat.base,
        power = request.move_power,
        opponent = request.opponent_stat,
        offensive = request.offensive_mode,
        "calculating damage ranges"
    );

    Ok(NatureMap::from_fn(|variant| {
        segment_stats(|iv| request.stat.battle_stat(iv, variant.multiplier()))
            .into_iter()
            .map(|segment| {
                let damage_values = request.roll(segment.stat);
                tracing::trace!(%variant, stat = segment.stat, ?damage_values, "segment rolled");
                RangeSegment {
                    stat: segment.stat,
                    ivs: segment.ivs,
                    damage_values,
                }
            })
            .collect()
    }))
}
