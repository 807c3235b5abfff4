//! Damage calculation.
//!
//! `formula` rolls a single attack, `ranges` sweeps it across IVs and
//! natures, `compact` merges identical outcomes, and `combined` handles
//! sequences of hits.

/// Per-generation mechanics
pub mod generations;

/// Modifier plans and battle conditions
pub mod modifier;

pub mod formula;
pub mod ranges;
pub mod compact;
pub mod combined;

pub use combined::{
    calculate_combined_damage, CombinedDamageOdds, CombinedDamageOptions, CombinedOdds, MAX_COMBINED_HITS,
};
pub use compact::{calculate_kill_ranges, combine_identical_lines, CompactRange, OneShotGroup};
pub use formula::{calculate_damage_values, get_base_damage, DamageRolls, ROLL_COUNT};
pub use generations::{GenMechanics, Generation, StatFormula};
pub use modifier::{BattleConditions, ModifierChain, ModifierKind, ModifierPhase, ModifierSlot};
pub use ranges::{calculate_damage_ranges, DamageRangeOptions, DamageRequest, RangeSegment, StatSegment};
