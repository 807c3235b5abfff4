//! Brilliant Diamond/Shining Pearl mechanics.

use super::GenMechanics;

/// Brilliant Diamond/Shining Pearl.
///
/// Damage follows the Gen 8 plan; experience multipliers are floored
/// products rather than 4096-scale fixed point.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bdsp;

impl GenMechanics for Bdsp {
    fn rounds_to_4096(&self) -> bool {
        false
    }
}
