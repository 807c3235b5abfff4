//! Game Freak's fixed-point and single-precision arithmetic.
//!
//! The experience formulas from Gen 5 onward run through 4096-scale fixed
//! point with a round-half-down step, and part of the math is done in
//! single precision. These helpers reproduce both.

use crate::damage::generations::{GenMechanics, Generation};

/// Fixed-point scale for modifiers (4096 = 1.0x).
pub const MOD_SCALE: u32 = 4096;

/// Round an `f64` through single precision.
#[inline]
pub fn fround(value: f64) -> f64 {
    f64::from(value as f32)
}

/// Game Freak's rounding function ("pokeRound").
///
/// Rounds up only when the remainder is strictly greater than half the
/// divisor, so an exact .5 rounds down.
#[inline]
pub fn pokeround(value: u32, divisor: u32) -> u32 {
    let quotient = value / divisor;
    let remainder = value % divisor;

    if remainder > divisor / 2 {
        quotient + 1
    } else {
        quotient
    }
}

/// Convert a multiplier to its numerator over 4096, rounding half up.
#[inline]
pub fn to_4096_numerator(multiplier: f64) -> u32 {
    (multiplier * f64::from(MOD_SCALE) + 0.5).floor() as u32
}

/// Truncate to 32 bits with wrap-around, as the game's registers do.
#[inline]
fn wrap_u32(value: f64) -> u32 {
    value.trunc() as u64 as u32
}

/// Multiply `value` by `multiplier` the way `gen` does.
///
/// Generations with 4096 rounding convert the multiplier to fixed point and
/// apply pokeRound to the product. The rest floor the plain product. The
/// result is always rounded through single precision.
pub fn multiply_for_generation(value: f64, multiplier: f64, gen: Generation) -> f64 {
    if !gen.rounds_to_4096() {
        return fround((value * multiplier).floor());
    }

    let product = wrap_u32(value * f64::from(to_4096_numerator(multiplier)));

    fround(f64::from(pokeround(product, MOD_SCALE)))
}

/// Apply `multipliers` in order with `multiply_for_generation`.
pub fn multiply_all_for_generation(value: f64, multipliers: &[f64], gen: Generation) -> f64 {
    multipliers
        .iter()
        .fold(value, |acc, &m| multiply_for_generation(acc, m, gen))
}

/// Product of `values` starting from 1, flooring after each step.
pub fn integer_multiply(values: &[f64]) -> f64 {
    values.iter().fold(1.0, |acc, &m| (acc * m).floor())
}

/// `value^2.5` computed in single precision.
pub fn gamefreak_power_of_two_point_five(value: f64) -> f64 {
    let rounded = value as f32;
    let squared = rounded * rounded;
    let root = f64::from(rounded).sqrt() as f32;

    f64::from(squared * root)
}
