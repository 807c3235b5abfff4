//! Display helpers for ranges and stats.

use crate::core_data::{Stat, MAX_IV};
use crate::iv_ranges::IvRange;
use crate::nature::NatureMap;
use std::fmt::Write;

/// Render rolls as `(min) / typical-range / (max)`, parenthesising a lowest or
/// highest roll that occurs only once.
pub fn format_damage_range(values: &[u32]) -> String {
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return String::new();
    };
    if first == last {
        return first.to_string();
    }
    if values.len() < 3 {
        return format_stat_range(first, last);
    }

    let second = values[1];
    let second_to_last = values[values.len() - 2];
    let mut out = String::new();

    if first != second {
        let _ = write!(out, "({first}) / ");
    }
    out.push_str(&format_stat_range(second, second_to_last));
    if second_to_last != last {
        let _ = write!(out, " / ({last})");
    }

    out
}

/// Compact IV range notation: `x` for none, `0+` for anything, `n-` and
/// `n+` for ranges touching either end.
pub fn format_iv_range(range: Option<IvRange>) -> String {
    let Some(range) = range else {
        return "x".to_string();
    };

    match (range.from(), range.to()) {
        (0, MAX_IV) => "0+".to_string(),
        (0, 0) => "0".to_string(),
        (0, to) => format!("{to}-"),
        (MAX_IV, MAX_IV) => MAX_IV.to_string(),
        (from, MAX_IV) => format!("{from}+"),
        (from, to) if from == to => from.to_string(),
        (from, to) => format!("{from}–{to}"),
    }
}

/// Negative, neutral and positive ranges separated by slashes.
pub fn format_iv_range_set(ranges: &NatureMap<Option<IvRange>>) -> String {
    let [negative, neutral, positive] = ranges.0.map(format_iv_range);
    format!("{negative} / {neutral} / {positive}")
}

pub fn format_stat_range<T: PartialEq + std::fmt::Display>(from: T, to: T) -> String {
    if from == to {
        from.to_string()
    } else {
        format!("{from}–{to}")
    }
}

/// Display name of a stat.
pub const fn format_stat_name(stat: Stat, short: bool) -> &'static str {
    match (stat, short) {
        (Stat::Hp, _) => "HP",
        (Stat::Attack, false) => "Attack",
        (Stat::Attack, true) => "ATK",
        (Stat::Defense, false) => "Defense",
        (Stat::Defense, true) => "DEF",
        (Stat::SpAttack, false) => "Sp. Attack",
        (Stat::SpAttack, true) => "SP ATK",
        (Stat::SpDefense, false) => "Sp. Defense",
        (Stat::SpDefense, true) => "SP DEF",
        (Stat::Speed, false) => "Speed",
        (Stat::Speed, true) => "SPE",
    }
}
