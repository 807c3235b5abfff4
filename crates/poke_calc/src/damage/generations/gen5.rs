//! Generation 5 (Black/White, Black 2/White 2) mechanics.

use super::GenMechanics;

/// Generation 5 mechanics.
///
/// Shares the Gen 9 modifier plan but keeps the 2.0x crit multiplier.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gen5;

impl GenMechanics for Gen5 {
    fn crit_multiplier(&self) -> f64 {
        2.0
    }
}
