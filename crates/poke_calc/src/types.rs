//! Type chart and type effectiveness.

use crate::core_data::{Type, TypeSet};
use crate::damage::generations::Generation;

/// Build a `TypeSet` in const context.
macro_rules! types {
    ($($t:ident),* $(,)?) => {
        TypeSet::from_bits_truncate(0 $(| (1 << Type::$t as u32))*)
    };
}

/// What one attacking type does to each defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackProfile {
    pub double: TypeSet,
    pub half: TypeSet,
    pub immune: TypeSet,
}

const fn profile(double: TypeSet, half: TypeSet, immune: TypeSet) -> AttackProfile {
    AttackProfile { double, half, immune }
}

/// Current attacking chart. Older generations are patched on the defending
/// side by `defensive_effectiveness`.
pub const fn attack_profile(attacker: Type) -> AttackProfile {
    match attacker {
        Type::Normal => profile(types![], types![Rock, Steel], types![Ghost]),
        Type::Fighting => profile(
            types![Normal, Rock, Steel, Ice, Dark],
            types![Flying, Poison, Bug, Psychic, Fairy],
            types![Ghost],
        ),
        Type::Flying => profile(types![Fighting, Bug, Grass], types![Rock, Steel, Electric], types![]),
        Type::Poison => profile(types![Grass, Fairy], types![Poison, Ground, Rock, Ghost], types![Steel]),
        Type::Ground => profile(
            types![Poison, Rock, Steel, Fire, Electric],
            types![Bug, Grass],
            types![Flying],
        ),
        Type::Rock => profile(types![Flying, Bug, Fire, Ice], types![Fighting, Ground, Steel], types![]),
        Type::Bug => profile(
            types![Grass, Psychic, Dark],
            types![Fighting, Flying, Poison, Ghost, Steel, Fire],
            types![],
        ),
        Type::Ghost => profile(types![Ghost, Psychic], types![Dark], types![Normal]),
        Type::Steel => profile(types![Rock, Ice, Fairy], types![Steel, Fire, Water, Electric], types![]),
        Type::Fire => profile(types![Bug, Steel, Grass], types![Rock, Fire, Water, Dragon], types![]),
        Type::Water => profile(types![Ground, Rock, Fire], types![Water, Grass, Dragon], types![]),
        Type::Grass => profile(
            types![Ground, Rock, Water],
            types![Flying, Poison, Bug, Steel, Fire, Grass, Dragon],
            types![],
        ),
        Type::Electric => profile(types![Flying, Water], types![Grass, Electric, Dragon], types![Ground]),
        Type::Psychic => profile(types![Fighting, Poison], types![Steel, Psychic], types![Dark]),
        Type::Ice => profile(
            types![Flying, Ground, Grass, Dragon],
            types![Steel, Fire, Water, Ice],
            types![],
        ),
        Type::Dragon => profile(types![Dragon], types![Steel], types![Fairy]),
        Type::Dark => profile(types![Ghost, Psychic], types![Fighting, Dark, Fairy], types![]),
        Type::Fairy => profile(types![Fighting, Dragon, Dark], types![Poison, Steel, Fire], types![]),
    }
}

/// Attacking types grouped by how well they hit a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefensiveEffectiveness {
    pub x4: TypeSet,
    pub x2: TypeSet,
    pub x0: TypeSet,
    pub half: TypeSet,
    pub fourth: TypeSet,
}

/// Where a patched attacker lands.
#[derive(Clone, Copy)]
enum Class {
    Double,
    Half,
    Immune,
    Neutral,
}

impl DefensiveEffectiveness {
    fn reclassify(&mut self, attacker: Type, class: Class) {
        let bit = attacker.as_set();
        for set in [&mut self.x2, &mut self.x0, &mut self.half] {
            set.remove(bit);
        }
        match class {
            Class::Double => self.x2.insert(bit),
            Class::Half => self.half.insert(bit),
            Class::Immune => self.x0.insert(bit),
            Class::Neutral => {}
        }
    }
}

/// How each attacking type hits a single-typed defender in `gen`.
pub fn defensive_effectiveness(defender: Type, gen: Generation) -> DefensiveEffectiveness {
    let mut chart = DefensiveEffectiveness::default();

    for attacker in Type::ALL {
        let profile = attack_profile(attacker);
        if profile.double.has(defender) {
            chart.x2.insert(attacker.as_set());
        }
        if profile.half.has(defender) {
            chart.half.insert(attacker.as_set());
        }
        if profile.immune.has(defender) {
            chart.x0.insert(attacker.as_set());
        }
    }

    let num = gen.num();
    if num < 6 && defender == Type::Steel {
        chart.reclassify(Type::Ghost, Class::Half);
        chart.reclassify(Type::Dark, Class::Half);
    }
    if num < 2 {
        match defender {
            Type::Poison => chart.reclassify(Type::Bug, Class::Double),
            Type::Bug => chart.reclassify(Type::Poison, Class::Double),
            Type::Psychic => chart.reclassify(Type::Ghost, Class::Immune),
            Type::Fire => chart.reclassify(Type::Ice, Class::Neutral),
            _ => {}
        }
    }

    chart
}

/// Combine the charts of a one- or two-typed defender.
pub fn combined_defensive_effectiveness(gen: Generation, defender: &[Type]) -> DefensiveEffectiveness {
    let chart = |i: usize| {
        defender
            .get(i)
            .map(|&t| defensive_effectiveness(t, gen))
            .unwrap_or_default()
    };
    let (first, second) = (chart(0), chart(1));

    let immune = first.x0 | second.x0;
    let double_either = first.x2.symmetric_difference(second.x2);
    let half_either = first.half.symmetric_difference(second.half);
    let any_half = first.half | second.half;
    let any_double = first.x2 | second.x2;

    DefensiveEffectiveness {
        x4: (first.x2 & second.x2) - immune,
        x2: (double_either - any_half) - immune,
        x0: immune,
        half: (half_either - any_double) - immune,
        fourth: (first.half & second.half) - immune,
    }
}

/// Damage multiplier of a `move_type` move against the defender's types.
pub fn calculate_move_effectiveness(move_type: Type, gen: Generation, defender: &[Type]) -> f64 {
    let chart = combined_defensive_effectiveness(gen, defender);

    if chart.x4.has(move_type) {
        4.0
    } else if chart.x2.has(move_type) {
        2.0
    } else if chart.x0.has(move_type) {
        0.0
    } else if chart.half.has(move_type) {
        0.5
    } else if chart.fourth.has(move_type) {
        0.25
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_type_chart() {
        let fire = defensive_effectiveness(Type::Fire, Generation::Gen9);
        assert_eq!(fire.x2.types(), vec![Type::Ground, Type::Rock, Type::Water]);
        assert_eq!(
            fire.half.types(),
            vec![Type::Bug, Type::Steel, Type::Fire, Type::Grass, Type::Ice, Type::Fairy]
        );
        assert!(fire.x0.is_empty());
    }

    #[test]
    fn test_steel_patch_before_gen6() {
        let modern = defensive_effectiveness(Type::Steel, Generation::Gen6);
        assert!(!modern.half.has(Type::Ghost));

        let old = defensive_effectiveness(Type::Steel, Generation::Gen5);
        assert!(old.half.has(Type::Ghost) && old.half.has(Type::Dark));

        let remake = defensive_effectiveness(Type::Steel, Generation::Bdsp);
        assert!(!remake.half.has(Type::Dark));
    }

    #[test]
    fn test_gen1_patches() {
        let gen = Generation::Gen1;
        assert!(defensive_effectiveness(Type::Poison, gen).x2.has(Type::Bug));
        assert!(defensive_effectiveness(Type::Bug, gen).x2.has(Type::Poison));
        assert!(!defensive_effectiveness(Type::Bug, gen).half.has(Type::Poison));
        assert!(defensive_effectiveness(Type::Psychic, gen).x0.has(Type::Ghost));
        assert!(!defensive_effectiveness(Type::Fire, gen).half.has(Type::Ice));

        assert_eq!(calculate_move_effectiveness(Type::Ice, Generation::Gen2, &[Type::Fire]), 0.5);
        assert_eq!(calculate_move_effectiveness(Type::Ice, gen, &[Type::Fire]), 1.0);
    }

    #[test]
    fn test_dual_type_classes() {
        let gen = Generation::Gen9;
        assert_eq!(calculate_move_effectiveness(Type::Ice, gen, &[Type::Dragon, Type::Flying]), 4.0);
        assert_eq!(calculate_move_effectiveness(Type::Fire, gen, &[Type::Water, Type::Dragon]), 0.25);
        // Weakness and resistance cancel out.
        assert_eq!(calculate_move_effectiveness(Type::Fire, gen, &[Type::Grass, Type::Water]), 1.0);
        assert_eq!(calculate_move_effectiveness(Type::Electric, gen, &[Type::Water, Type::Ground]), 0.0);
        assert_eq!(calculate_move_effectiveness(Type::Normal, gen, &[Type::Normal]), 1.0);
        assert_eq!(calculate_move_effectiveness(Type::Water, gen, &[Type::Fire]), 2.0);
    }

    #[test]
    fn test_immunity_overrides_weakness() {
        let chart = combined_defensive_effectiveness(Generation::Gen9, &[Type::Flying, Type::Steel]);
        assert!(chart.x0.has(Type::Ground) && chart.x0.has(Type::Poison));
        assert!(!chart.x2.has(Type::Ground));
    }

    #[test]
    fn test_no_types() {
        let chart = combined_defensive_effectiveness(Generation::Gen9, &[]);
        assert_eq!(chart, DefensiveEffectiveness::default());
        assert_eq!(calculate_move_effectiveness(Type::Fire, Generation::Gen9, &[]), 1.0);
    }
}
