//! Stat formulas.
//!
//! Every formula here is pure and total over its documented domain. All
//! intermediate values are non-negative, so flooring and truncation agree.

use crate::core_data::Stat;
use crate::damage::generations::{GenMechanics, Generation, StatFormula};
use crate::error::{CalcError, CalcResult};

/// Combat stages range from -6 to +6.
pub const MIN_COMBAT_STAGE: i8 = -6;
pub const MAX_COMBAT_STAGE: i8 = 6;

/// Highest awakening value a Let's Go stat can carry.
pub const MAX_AWAKENING_VALUE: u16 = 200;

/// Reject awakening values the Let's Go formula cannot carry.
pub(crate) fn check_evs(gen: Generation, evs: u16) -> CalcResult<()> {
    if gen.stat_formula() == StatFormula::LetsGo && evs > MAX_AWAKENING_VALUE {
        return Err(CalcError::invalid(
            "evs",
            format!("{evs} awakening values exceed {MAX_AWAKENING_VALUE}"),
        ));
    }
    Ok(())
}

/// Calculate a stat using the Gen 1 and 2 formula.
///
/// `dv` is the determinant value and `stat_exp` the stat experience. Natures
/// do not exist, so there is no multiplier.
pub fn calculate_gen1_stat(level: u8, base: u16, dv: u8, stat_exp: u16) -> u16 {
    let exp_term = (f64::from(stat_exp).sqrt().ceil() / 4.0).floor();
    let scaled = ((2.0 * (f64::from(base) + f64::from(dv)) + exp_term) * f64::from(level) / 100.0).floor();

    (scaled + 5.0) as u16
}

/// Calculate a stat using the Gen 3+ formula.
///
/// The nature multiplier is applied after the +5 constant, then floored.
pub fn calculate_stat(level: u8, base: u16, iv: u8, ev: u16, nature: f64) -> u16 {
    let inner = 2.0 * f64::from(base) + f64::from(iv) + (f64::from(ev) / 4.0).floor();
    let scaled = (inner * f64::from(level) / 100.0).floor();

    ((scaled + 5.0) * nature).floor() as u16
}

/// Calculate a stat using the Let's Go formula.
///
/// `av` is the awakening value, added last and never multiplied.
pub fn calculate_lgpe_stat(level: u8, base: u16, iv: u8, av: u16, nature: f64, friendship: u8) -> u16 {
    let friendship_mod = 1.0 + (10.0 * (f64::from(friendship) / 255.0)).floor() / 100.0;
    let scaled = ((2.0 * f64::from(base) + f64::from(iv)) * f64::from(level) / 100.0).floor();
    let natured = ((scaled + 5.0) * nature).floor();

    ((natured * friendship_mod).floor() as u16).saturating_add(av)
}

/// Calculate total HP. Natures never apply.
pub fn calculate_hp(level: u8, base: u16, iv: u8, ev: u16, gen: Generation) -> u16 {
    let level_f = f64::from(level);

    let value = match gen.stat_formula() {
        StatFormula::Classic => {
            let exp_term = (f64::from(ev).sqrt().ceil() / 4.0).floor();
            ((2.0 * (f64::from(base) + f64::from(iv)) + exp_term) * level_f / 100.0).floor() + level_f + 10.0
        }
        StatFormula::LetsGo => {
            ((2.0 * f64::from(base) + f64::from(iv)) * level_f / 100.0).floor() + level_f + 10.0 + f64::from(ev)
        }
        StatFormula::Modern => {
            let inner = 2.0 * f64::from(base) + f64::from(iv) + (f64::from(ev) / 4.0).floor();
            (inner * level_f / 100.0).floor() + level_f + 10.0
        }
    };

    value as u16
}

/// Inputs shared by every stat evaluation for one creature at one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatInputs {
    pub level: u8,
    pub base: u16,
    pub ev: u16,
    pub gen: Generation,
    /// Only read by the Let's Go formula.
    pub friendship: u8,
}

impl StatInputs {
    /// Evaluate `stat` at `iv` under a nature multiplier, dispatching on the
    /// stat and the generation's formula family.
    pub fn evaluate(&self, stat: Stat, iv: u8, nature: f64) -> u16 {
        if stat.is_hp() {
            return calculate_hp(self.level, self.base, iv, self.ev, self.gen);
        }

        self.battle_stat(iv, nature)
    }

    /// Evaluate a non-HP stat at `iv` under a nature multiplier.
    pub fn battle_stat(&self, iv: u8, nature: f64) -> u16 {
        match self.gen.stat_formula() {
            StatFormula::Classic => calculate_gen1_stat(self.level, self.base, iv, self.ev),
            StatFormula::Modern => calculate_stat(self.level, self.base, iv, self.ev, nature),
            StatFormula::LetsGo => {
                calculate_lgpe_stat(self.level, self.base, iv, self.ev, nature, self.friendship)
            }
        }
    }
}

/// Determine a stat value after applying combat stages.
///
/// `stages` is clamped to -6..=6.
pub fn apply_combat_stages(stat: u16, stages: i8) -> u16 {
    let stages = stages.clamp(MIN_COMBAT_STAGE, MAX_COMBAT_STAGE);
    let value = f64::from(stat);

    let adjusted = match stages {
        0 => return stat,
        k if k > 0 => value * ((f64::from(k) + 2.0) / 2.0),
        k => value * (2.0 / (f64::from(k.unsigned_abs()) + 2.0)),
    };

    adjusted.floor() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::MAX_IV;

    #[test]
    fn test_modern_stat() {
        // Level 25, base 81, 16 EVs
        assert_eq!(calculate_stat(25, 81, 0, 16, 1.0), 46);
        assert_eq!(calculate_stat(25, 81, 0, 16, 0.9), 41);
        assert_eq!(calculate_stat(25, 81, 31, 16, 1.1), 59);
        assert_eq!(calculate_stat(100, 100, 31, 252, 1.1), 328);
    }

    #[test]
    fn test_gen1_stat() {
        assert_eq!(calculate_gen1_stat(100, 100, 15, 65535), 299);
        assert_eq!(calculate_gen1_stat(5, 45, 0, 0), 9);
    }

    #[test]
    fn test_lgpe_stat() {
        // Friendship 255 gives the full 10%
        assert_eq!(calculate_lgpe_stat(50, 100, 31, 0, 1.0, 255), 132);
        assert_eq!(calculate_lgpe_stat(50, 100, 31, 200, 1.0, 0), 320);
        assert_eq!(calculate_lgpe_stat(50, 100, 31, u16::MAX, 1.0, 255), u16::MAX);
    }

    #[test]
    fn test_hp_by_generation() {
        assert_eq!(calculate_hp(100, 100, 31, 252, Generation::Gen9), 404);
        assert_eq!(calculate_hp(100, 100, 15, 65535, Generation::Gen1), 404);
        assert_eq!(calculate_hp(50, 100, 31, 200, Generation::LetsGo), 375);
    }

    #[test]
    fn test_combat_stages() {
        assert_eq!(apply_combat_stages(100, 0), 100);
        assert_eq!(apply_combat_stages(100, 1), 150);
        assert_eq!(apply_combat_stages(100, 6), 400);
        assert_eq!(apply_combat_stages(100, -1), 66);
        assert_eq!(apply_combat_stages(100, -6), 25);
        assert_eq!(apply_combat_stages(100, 9), 400);
    }

    #[test]
    fn test_combat_stages_strictly_monotonic() {
        let values: Vec<u16> = (-6..=6).map(|k| apply_combat_stages(200, k)).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stat_non_decreasing_in_iv() {
        for gen in Generation::ALL {
            for stat in Stat::ALL {
                for nature in [0.9, 1.0, 1.1] {
                    let inputs = StatInputs {
                        level: 37,
                        base: 73,
                        ev: 84,
                        gen,
                        friendship: 140,
                    };
                    let values: Vec<u16> = (0..=MAX_IV)
                        .map(|iv| inputs.evaluate(stat, iv, nature))
                        .collect();
                    assert!(
                        values.windows(2).all(|w| w[0] <= w[1]),
                        "{gen} {stat:?} {nature}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_hp_ignores_nature() {
        let inputs = StatInputs {
            level: 50,
            base: 80,
            ev: 0,
            gen: Generation::Gen8,
            friendship: 0,
        };
        assert_eq!(
            inputs.evaluate(Stat::Hp, 20, 0.9),
            inputs.evaluate(Stat::Hp, 20, 1.1)
        );
    }
}
