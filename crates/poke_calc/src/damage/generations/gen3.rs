//! Generation 3 (Ruby/Sapphire/Emerald, FireRed/LeafGreen) mechanics.

use super::GenMechanics;
use crate::damage::modifier::{ModifierKind::*, ModifierPhase::*, ModifierSlot};

// STAB and effectiveness land before the random factor only in this generation.
pub(super) const PLAN: &[ModifierSlot] = &[
    ModifierSlot::new(PinchAbility, RawPower),
    ModifierSlot::new(OtherPower, BasePower),
    ModifierSlot::new(Critical, PreRandom),
    ModifierSlot::new(Stab, PreRandom),
    ModifierSlot::new(Effectiveness, PreRandom),
    ModifierSlot::new(Other, PostRandom),
];

/// Generation 3 mechanics.
///
/// Key features:
/// - Natures, IVs and EVs introduced
/// - 2.0x crit multiplier
/// - Spread moves deal half damage
#[derive(Clone, Copy, Debug, Default)]
pub struct Gen3;

impl GenMechanics for Gen3 {
    fn modifier_plan(&self) -> &'static [ModifierSlot] {
        PLAN
    }

    fn crit_multiplier(&self) -> f64 {
        2.0
    }

    fn multi_target_modifier(&self) -> f64 {
        0.5
    }

    fn rounds_to_4096(&self) -> bool {
        false
    }
}
