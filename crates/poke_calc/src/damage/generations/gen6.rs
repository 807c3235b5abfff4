//! Generation 6 (X/Y, Omega Ruby/Alpha Sapphire) mechanics.

use super::GenMechanics;

/// Generation 6 mechanics.
///
/// Crits drop to 1.5x. Experience multipliers are plain floored products.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gen6;

impl GenMechanics for Gen6 {
    fn rounds_to_4096(&self) -> bool {
        false
    }
}
