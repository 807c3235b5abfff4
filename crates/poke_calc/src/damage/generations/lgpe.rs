//! Let's Go, Pikachu! and Let's Go, Eevee! mechanics.

use super::{GenMechanics, StatFormula};
use crate::damage::modifier::{ModifierKind::*, ModifierPhase::*, ModifierSlot};

// No abilities and no screens.
pub(super) const PLAN: &[ModifierSlot] = &[
    ModifierSlot::new(OtherPower, BasePower),
    ModifierSlot::new(MultiTarget, PreRandom),
    ModifierSlot::new(WeatherBoost, PreRandom),
    ModifierSlot::new(WeatherPenalty, PreRandom),
    ModifierSlot::new(Critical, PreRandom),
    ModifierSlot::new(Stab, PostRandom),
    ModifierSlot::new(Effectiveness, PostRandom),
    ModifierSlot::new(Other, PostRandom),
];

/// Let's Go mechanics.
///
/// Key features:
/// - Awakening values replace EVs and are added after every multiplier
/// - Friendship boosts non-HP stats by up to 10%
#[derive(Clone, Copy, Debug, Default)]
pub struct LetsGo;

impl GenMechanics for LetsGo {
    fn modifier_plan(&self) -> &'static [ModifierSlot] {
        PLAN
    }

    fn stat_formula(&self) -> StatFormula {
        StatFormula::LetsGo
    }
}
