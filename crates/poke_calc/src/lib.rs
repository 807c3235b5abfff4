//! poke_calc - Damage ranges, IV inference and knockout odds
//!
//! Every calculation is a pure function over its inputs and reproduces the
//! games' truncating integer arithmetic bit for bit.

/// Types, stats and stat-keyed maps
pub mod core_data;

/// Crate error type
pub mod error;

/// Fixed-point helpers
pub mod math;

/// Stat formulas
pub mod stats;

/// Natures and nature determination
pub mod nature;

/// IV range inference
pub mod iv_ranges;

/// Damage formula, ranges and multi-hit odds
pub mod damage;

pub mod hidden_power;
pub mod types;
pub mod experience;

/// Display helpers
pub mod format;

// Re-export commonly used types
pub use core_data::{Stat, StatMap, Type, TypeSet, MAX_IV};
pub use damage::{
    calculate_combined_damage, calculate_damage_ranges, calculate_kill_ranges, combine_identical_lines,
    BattleConditions, CombinedDamageOptions, CombinedOdds, CompactRange, DamageRangeOptions, DamageRolls,
    Generation, OneShotGroup, RangeSegment,
};
pub use error::{CalcError, CalcResult};
pub use experience::{calculate_experience_gain, calculate_experience_required_for_level, ExperienceGainOptions, GrowthRate};
pub use hidden_power::{calculate_hidden_power_base_power, calculate_hidden_power_type};
pub use iv_ranges::{calculate_possible_iv_range, filter_to_stat_range, IvInferenceOptions, IvRange, IvRangeSet};
pub use nature::{determine_nature_status, ConfirmedNature, Nature, NatureMap, NatureStatus, NatureVariant};
pub use stats::{apply_combat_stages, calculate_stat};
