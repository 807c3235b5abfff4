//! Core damage formula.
//!
//! Every multiplication truncates before the next one is applied. Folding a
//! list of modifiers into one product first gives different results.

use super::modifier::ModifierChain;

/// Number of random factors, 85% through 100%.
pub const ROLL_COUNT: usize = 16;

/// The sixteen possible damage values of one move use, in random-factor order.
pub type DamageRolls = [u32; ROLL_COUNT];

/// Level factor: `floor(2 * level / 5) + 2`.
#[inline]
pub fn level_factor(level: u8) -> f64 {
    (2.0 * f64::from(level) / 5.0).trunc() + 2.0
}

/// Fold `modifiers` into `value`, truncating after each step.
#[inline]
pub fn fold_truncating(value: f64, modifiers: &[f64]) -> f64 {
    modifiers.iter().fold(value, |acc, m| (acc * m).trunc())
}

/// Calculate base damage before random and post-random modifiers.
///
/// Formula: `floor(floor(level_factor * power * attack / defense) / 50) + 2`
///
/// A defense of zero deals no damage.
pub fn get_base_damage(level: u8, power: f64, attack: f64, defense: f64) -> f64 {
    if defense <= 0.0 {
        return 0.0;
    }

    ((level_factor(level) * power * attack / defense).floor() / 50.0).trunc() + 2.0
}

/// Calculate the sixteen damage values a move can roll.
///
/// `base_power_modifiers` are folded into `power`; `pre_random` and
/// `post_random` surround the random factor when folding into base damage.
pub fn calculate_damage_values(
    level: u8,
    power: f64,
    attack: f64,
    defense: f64,
    base_power_modifiers: &[f64],
    pre_random: &[f64],
    post_random: &[f64],
) -> DamageRolls {
    let adjusted_power = fold_truncating(power, base_power_modifiers);
    let base_damage = get_base_damage(level, adjusted_power, attack, defense);
    let before_random = fold_truncating(base_damage, pre_random);

    std::array::from_fn(|i| {
        let random = (85 + i) as f64 / 100.0;
        let rolled = (before_random * random).trunc();
        fold_truncating(rolled, post_random) as u32
    })
}

impl ModifierChain {
    /// Roll damage with this chain, applying the untruncated raw-power and
    /// attack multipliers first.
    pub fn roll(&self, level: u8, power: f64, attack: f64, defense: f64) -> DamageRolls {
        calculate_damage_values(
            level,
            self.raw_power(power),
            self.attack(attack),
            defense,
            &self.base_power,
            &self.pre_random,
            &self.post_random,
        )
    }
}
