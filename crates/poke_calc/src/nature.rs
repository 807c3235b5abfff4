//! Natures: the catalogue, the three stat variants they produce, and
//! deduction of the nature from inferred IV ranges.

use crate::core_data::{Stat, StatMap};
use crate::iv_ranges::IvRangeSet;
use bitflags::bitflags;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// How a nature affects one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NatureVariant {
    Negative,
    Neutral,
    Positive,
}

impl NatureVariant {
    /// Variants in multiplier order.
    pub const ALL: [NatureVariant; 3] = [
        NatureVariant::Negative,
        NatureVariant::Neutral,
        NatureVariant::Positive,
    ];

    /// Stat multiplier. Never applied to HP.
    #[inline]
    pub const fn multiplier(self) -> f64 {
        match self {
            NatureVariant::Negative => 0.9,
            NatureVariant::Neutral => 1.0,
            NatureVariant::Positive => 1.1,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            NatureVariant::Negative => "Negative Nature",
            NatureVariant::Neutral => "Neutral Nature",
            NatureVariant::Positive => "Positive Nature",
        }
    }

    #[inline]
    pub const fn as_flag(self) -> NatureVariants {
        match self {
            NatureVariant::Negative => NatureVariants::NEGATIVE,
            NatureVariant::Neutral => NatureVariants::NEUTRAL,
            NatureVariant::Positive => NatureVariants::POSITIVE,
        }
    }
}

impl fmt::Display for NatureVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-size map keyed by `NatureVariant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NatureMap<T>(pub [T; 3]);

impl<T> NatureMap<T> {
    pub const fn new(negative: T, neutral: T, positive: T) -> Self {
        Self([negative, neutral, positive])
    }

    pub fn from_fn(f: impl FnMut(NatureVariant) -> T) -> Self {
        Self(NatureVariant::ALL.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NatureVariant, &T)> {
        NatureVariant::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(NatureVariant, T) -> U) -> NatureMap<U> {
        let [negative, neutral, positive] = self.0;
        NatureMap([
            f(NatureVariant::Negative, negative),
            f(NatureVariant::Neutral, neutral),
            f(NatureVariant::Positive, positive),
        ])
    }
}

impl<T> Index<NatureVariant> for NatureMap<T> {
    type Output = T;

    fn index(&self, variant: NatureVariant) -> &T {
        &self.0[variant.index()]
    }
}

impl<T> IndexMut<NatureVariant> for NatureMap<T> {
    fn index_mut(&mut self, variant: NatureVariant) -> &mut T {
        &mut self.0[variant.index()]
    }
}

bitflags! {
    /// A set of nature variants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NatureVariants: u8 {
        const NEGATIVE = 1 << 0;
        const NEUTRAL = 1 << 1;
        const POSITIVE = 1 << 2;
    }
}

impl NatureVariants {
    #[inline]
    pub const fn has(self, variant: NatureVariant) -> bool {
        self.contains(variant.as_flag())
    }

    /// Members in multiplier order.
    pub fn variants(self) -> impl Iterator<Item = NatureVariant> {
        NatureVariant::ALL.into_iter().filter(move |v| self.has(*v))
    }
}

/// A named nature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nature {
    pub name: &'static str,
    pub boosted: Stat,
    pub reduced: Stat,
}

impl Nature {
    /// Neutral natures boost and reduce the same stat.
    #[inline]
    pub const fn is_neutral(&self) -> bool {
        self.boosted as u8 == self.reduced as u8
    }

    pub fn variant_for(&self, stat: Stat) -> NatureVariant {
        if self.boosted == stat && self.reduced != stat {
            NatureVariant::Positive
        } else if self.reduced == stat && self.boosted != stat {
            NatureVariant::Negative
        } else {
            NatureVariant::Neutral
        }
    }

    /// Multiplier this nature applies to `stat`.
    pub fn multiplier(&self, stat: Stat) -> f64 {
        self.variant_for(stat).multiplier()
    }
}

macro_rules! nature {
    ($name:literal, $boosted:ident, $reduced:ident) => {
        Nature {
            name: $name,
            boosted: Stat::$boosted,
            reduced: Stat::$reduced,
        }
    };
}

static NATURES: phf::Map<&'static str, Nature> = phf_map! {
    "hardy" => nature!("Hardy", Attack, Attack),
    "lonely" => nature!("Lonely", Attack, Defense),
    "adamant" => nature!("Adamant", Attack, SpAttack),
    "naughty" => nature!("Naughty", Attack, SpDefense),
    "brave" => nature!("Brave", Attack, Speed),
    "bold" => nature!("Bold", Defense, Attack),
    "docile" => nature!("Docile", Defense, Defense),
    "impish" => nature!("Impish", Defense, SpAttack),
    "lax" => nature!("Lax", Defense, SpDefense),
    "relaxed" => nature!("Relaxed", Defense, Speed),
    "modest" => nature!("Modest", SpAttack, Attack),
    "mild" => nature!("Mild", SpAttack, Defense),
    "bashful" => nature!("Bashful", SpAttack, SpAttack),
    "rash" => nature!("Rash", SpAttack, SpDefense),
    "quiet" => nature!("Quiet", SpAttack, Speed),
    "calm" => nature!("Calm", SpDefense, Attack),
    "gentle" => nature!("Gentle", SpDefense, Defense),
    "careful" => nature!("Careful", SpDefense, SpAttack),
    "quirky" => nature!("Quirky", SpDefense, SpDefense),
    "sassy" => nature!("Sassy", SpDefense, Speed),
    "timid" => nature!("Timid", Speed, Attack),
    "hasty" => nature!("Hasty", Speed, Defense),
    "jolly" => nature!("Jolly", Speed, SpAttack),
    "naive" => nature!("Naive", Speed, SpDefense),
    "serious" => nature!("Serious", Speed, Speed),
};

/// Look up a nature by name (case-insensitive).
pub fn nature_by_name(name: &str) -> Option<&'static Nature> {
    NATURES.get(name.to_ascii_lowercase().as_str())
}

/// Every nature, in no particular order.
pub fn all_natures() -> impl Iterator<Item = &'static Nature> {
    NATURES.values()
}

/// The stats known to be reduced and boosted by the nature, if any.
///
/// Both sides naming the same stat means the nature is neutral for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedNature {
    pub reduced: Option<Stat>,
    pub boosted: Option<Stat>,
}

impl ConfirmedNature {
    pub const UNKNOWN: ConfirmedNature = ConfirmedNature {
        reduced: None,
        boosted: None,
    };

    pub const fn new(reduced: Option<Stat>, boosted: Option<Stat>) -> Self {
        Self { reduced, boosted }
    }
}

/// Outcome of nature deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatureStatus {
    /// Whatever could be confirmed. Either side may still be `None`.
    Determined(ConfirmedNature),
    /// The IV ranges contradict every nature.
    Indeterminate,
}

impl NatureStatus {
    /// The confirmed nature, treating an indeterminate result as unknown.
    pub fn confirmed(self) -> ConfirmedNature {
        match self {
            NatureStatus::Determined(confirmed) => confirmed,
            NatureStatus::Indeterminate => ConfirmedNature::UNKNOWN,
        }
    }
}

/// Which nature variants are still possible for `stat` given what has been
/// confirmed about the nature.
pub fn possible_variants_for_stat(stat: Stat, confirmed: ConfirmedNature) -> NatureVariants {
    let ConfirmedNature { reduced, boosted } = confirmed;

    match (reduced == Some(stat), boosted == Some(stat)) {
        (false, true) => return NatureVariants::POSITIVE,
        (true, false) => return NatureVariants::NEGATIVE,
        (true, true) => return NatureVariants::NEUTRAL,
        (false, false) => {}
    }

    let mut variants = NatureVariants::all();
    if reduced.is_some() {
        variants.remove(NatureVariants::NEGATIVE);
    }
    if boosted.is_some() {
        variants.remove(NatureVariants::POSITIVE);
    }
    variants
}

/// Which variants still explain the observations for `stat`: the variant
/// must have a non-empty IV range and must not be ruled out by the confirmed
/// nature.
pub fn possible_nature_adjustments_for_stat(
    range_set: &IvRangeSet,
    stat: Stat,
    confirmed: ConfirmedNature,
) -> NatureVariants {
    let ConfirmedNature { reduced, boosted } = confirmed;

    if boosted == Some(stat) && reduced != Some(stat) {
        return NatureVariants::POSITIVE;
    }
    if reduced == Some(stat) && boosted != Some(stat) {
        return NatureVariants::NEGATIVE;
    }

    let mut variants = NatureVariants::empty();
    if range_set.has(NatureVariant::Negative) && reduced.is_none() {
        variants |= NatureVariants::NEGATIVE;
    }
    if range_set.has(NatureVariant::Neutral) {
        variants |= NatureVariants::NEUTRAL;
    }
    if range_set.has(NatureVariant::Positive) && boosted.is_none() {
        variants |= NatureVariants::POSITIVE;
    }
    variants
}

/// Keep the entries of `values` whose variant is still possible for `stat`.
pub fn filter_by_possible_nature_adjustments<T>(
    range_set: &IvRangeSet,
    stat: Stat,
    confirmed: ConfirmedNature,
    values: NatureMap<T>,
) -> Vec<T> {
    let allowed = possible_nature_adjustments_for_stat(range_set, stat, confirmed);

    NatureVariant::ALL
        .into_iter()
        .zip(values.0)
        .filter(|(variant, _)| allowed.has(*variant))
        .map(|(_, value)| value)
        .collect()
}

/// Battle stats that only `variant` can explain: its range is non-empty and
/// both other variants' ranges are empty.
fn exclusive_stats(ranges: &StatMap<IvRangeSet>, variant: NatureVariant) -> Vec<Stat> {
    Stat::BATTLE
        .into_iter()
        .filter(|&stat| {
            let set = &ranges[stat];
            NatureVariant::ALL
                .into_iter()
                .all(|other| set.has(other) == (other == variant))
        })
        .collect()
}

/// Deduce the nature from per-stat IV range sets.
///
/// A stat is confirmed reduced when it is the only battle stat that only the
/// negative variant can explain; boosted is symmetric. Once one side is
/// confirmed and exactly one stat remains possible on the other side, that
/// stat is confirmed by exclusion. `forced` overrides either side.
pub fn determine_nature_status(ranges: &StatMap<IvRangeSet>, forced: ConfirmedNature) -> NatureStatus {
    if forced.reduced.is_some() && forced.boosted.is_some() {
        return NatureStatus::Determined(forced);
    }

    let exclusive_negatives = exclusive_stats(ranges, NatureVariant::Negative);
    let exclusive_positives = exclusive_stats(ranges, NatureVariant::Positive);

    if exclusive_negatives.len() > 1 || exclusive_positives.len() > 1 {
        tracing::warn!(
            negatives = ?exclusive_negatives,
            positives = ?exclusive_positives,
            "several stats claim the same side of the nature, nature is indeterminate"
        );
        return NatureStatus::Indeterminate;
    }

    let reduced = forced.reduced.or(exclusive_negatives.first().copied());
    let boosted = forced.boosted.or(exclusive_positives.first().copied());

    let possible = |variant: NatureVariant| -> Vec<Stat> {
        Stat::BATTLE
            .into_iter()
            .filter(|&stat| ranges[stat].has(variant))
            .collect()
    };
    let possible_negatives = possible(NatureVariant::Negative);
    let possible_positives = possible(NatureVariant::Positive);

    if possible_negatives.is_empty() || possible_positives.is_empty() {
        tracing::warn!(
            negatives = possible_negatives.len(),
            positives = possible_positives.len(),
            "no stat can carry one side of the nature, nature is indeterminate"
        );
        return NatureStatus::Indeterminate;
    }

    let by_exclusion = |confirmed_other: Option<Stat>, candidates: &[Stat]| match candidates {
        [only] if confirmed_other.is_some() => Some(*only),
        _ => None,
    };

    let confirmed = ConfirmedNature {
        reduced: reduced.or_else(|| by_exclusion(boosted, &possible_negatives)),
        boosted: boosted.or_else(|| by_exclusion(reduced, &possible_positives)),
    };

    tracing::debug!(?confirmed, "nature deduced");
    NatureStatus::Determined(confirmed)
}
