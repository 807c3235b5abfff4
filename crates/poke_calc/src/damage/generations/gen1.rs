//! Generation 1 and 2 (Red/Blue/Yellow, Gold/Silver/Crystal) mechanics.

use super::{GenMechanics, StatFormula};
use crate::damage::modifier::{ModifierKind::*, ModifierPhase::*, ModifierSlot};

pub(super) const PLAN: &[ModifierSlot] = &[
    ModifierSlot::new(PinchAbility, RawPower),
    ModifierSlot::new(OtherPower, BasePower),
    ModifierSlot::new(Critical, PreRandom),
    ModifierSlot::new(Stab, PostRandom),
    ModifierSlot::new(Effectiveness, PostRandom),
    ModifierSlot::new(Other, PostRandom),
];

/// Generation 1 and 2 mechanics.
///
/// Key features:
/// - DVs and stat experience instead of IVs and EVs
/// - No natures
/// - 2.0x crit multiplier
#[derive(Clone, Copy, Debug, Default)]
pub struct Gen1;

impl GenMechanics for Gen1 {
    fn modifier_plan(&self) -> &'static [ModifierSlot] {
        PLAN
    }

    fn crit_multiplier(&self) -> f64 {
        2.0
    }

    fn stat_formula(&self) -> StatFormula {
        StatFormula::Classic
    }

    fn rounds_to_4096(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::modifier::{ModifierKind::*, ModifierPhase::*};

    #[test]
    fn test_gen1_formula_family() {
        assert_eq!(Gen1.stat_formula(), StatFormula::Classic);
        assert_eq!(Gen1.crit_multiplier(), 2.0);
    }

    #[test]
    fn test_gen1_has_no_field_modifiers() {
        assert!(PLAN
            .iter()
            .all(|slot| !matches!(slot.kind, Screen | MultiTarget | WeatherBoost | WeatherPenalty)));
    }
}
