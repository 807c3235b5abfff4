//! Generation 4 (Diamond/Pearl/Platinum, HeartGold/SoulSilver) mechanics.

use super::GenMechanics;
use crate::damage::modifier::{ModifierKind::*, ModifierPhase::*, ModifierSlot};

// Field effects are folded into base power here, not into damage.
pub(super) const PLAN: &[ModifierSlot] = &[
    ModifierSlot::new(PinchAbility, RawPower),
    ModifierSlot::new(Screen, BasePower),
    ModifierSlot::new(MultiTarget, BasePower),
    ModifierSlot::new(WeatherBoost, BasePower),
    ModifierSlot::new(WeatherPenalty, BasePower),
    ModifierSlot::new(OtherPower, BasePower),
    ModifierSlot::new(Critical, PreRandom),
    ModifierSlot::new(Stab, PostRandom),
    ModifierSlot::new(Effectiveness, PostRandom),
    ModifierSlot::new(Other, PostRandom),
];

/// Generation 4 mechanics.
///
/// Key features:
/// - Physical/Special split introduced (moves have their own category)
/// - 2.0x crit multiplier
#[derive(Clone, Copy, Debug, Default)]
pub struct Gen4;

impl GenMechanics for Gen4 {
    fn modifier_plan(&self) -> &'static [ModifierSlot] {
        PLAN
    }

    fn crit_multiplier(&self) -> f64 {
        2.0
    }

    fn rounds_to_4096(&self) -> bool {
        false
    }
}
