//! Generation 7 through 9 (Sun/Moon to Scarlet/Violet) mechanics.
//!
//! This is the canonical, default implementation. All trait defaults
//! in `GenMechanics` reflect this rule set.

use super::GenMechanics;
use crate::damage::modifier::{ModifierKind::*, ModifierPhase::*, ModifierSlot};

/// Plan shared by every generation from 5 onward.
pub(super) const PLAN: &[ModifierSlot] = &[
    ModifierSlot::new(PinchAbility, Attack),
    ModifierSlot::new(OtherPower, BasePower),
    ModifierSlot::new(MultiTarget, PreRandom),
    ModifierSlot::new(WeatherBoost, PreRandom),
    ModifierSlot::new(WeatherPenalty, PreRandom),
    ModifierSlot::new(Critical, PreRandom),
    ModifierSlot::new(Stab, PostRandom),
    ModifierSlot::new(Effectiveness, PostRandom),
    ModifierSlot::new(Screen, PostRandom),
    ModifierSlot::new(Other, PostRandom),
];

/// Generation 9 mechanics, also used for Gens 7 and 8.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gen9;

impl GenMechanics for Gen9 {
    // All defaults match this rule set, so no overrides needed.
}
