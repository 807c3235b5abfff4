//! IV range inference.
//!
//! Observed stat values at known levels narrow down which IVs a creature can
//! have. Each nature variant is tracked separately since the nature is
//! usually unknown while the observations come in.

use crate::core_data::{Stat, MAX_IV};
use crate::damage::generations::{GenMechanics, Generation, StatFormula};
use crate::error::{CalcError, CalcResult};
use crate::nature::{
    possible_nature_adjustments_for_stat, possible_variants_for_stat, ConfirmedNature, NatureMap,
    NatureVariant, NatureVariants,
};
use crate::stats::{check_evs, StatInputs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// An inclusive, non-empty range of IVs within `0..=31`.
///
/// Emptiness is expressed as `Option<IvRange>::None`, never as a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIvRange")]
pub struct IvRange {
    from: u8,
    to: u8,
}

/// Unchecked wire form of `IvRange`.
#[derive(Deserialize)]
struct RawIvRange {
    from: u8,
    to: u8,
}

impl TryFrom<RawIvRange> for IvRange {
    type Error = CalcError;

    fn try_from(raw: RawIvRange) -> Result<Self, Self::Error> {
        IvRange::new(raw.from, raw.to)
    }
}

impl IvRange {
    /// Every IV.
    pub const FULL: IvRange = IvRange { from: 0, to: MAX_IV };

    pub fn new(from: u8, to: u8) -> CalcResult<Self> {
        if to > MAX_IV {
            return Err(CalcError::invalid("iv", format!("{to} is above {MAX_IV}")));
        }
        if from > to {
            return Err(CalcError::invalid("iv", format!("range {from}..{to} is reversed")));
        }
        Ok(Self { from, to })
    }

    /// A single IV.
    pub fn point(iv: u8) -> CalcResult<Self> {
        Self::new(iv, iv)
    }

    /// Smallest range covering every IV in `ivs`, or `None` when it is empty.
    pub(crate) fn spanning(ivs: impl IntoIterator<Item = u8>) -> Option<Self> {
        ivs.into_iter().fold(None, |acc: Option<IvRange>, iv| {
            Some(match acc {
                Some(range) => range.extend(iv),
                None => IvRange::single(iv),
            })
        })
    }

    /// A single IV, clamped to the valid domain.
    pub(crate) const fn single(iv: u8) -> Self {
        let iv = if iv > MAX_IV { MAX_IV } else { iv };
        IvRange { from: iv, to: iv }
    }

    /// Grow the range to include `iv`.
    pub(crate) fn extend(self, iv: u8) -> Self {
        let iv = iv.min(MAX_IV);
        IvRange {
            from: self.from.min(iv),
            to: self.to.max(iv),
        }
    }

    #[inline]
    pub const fn from(self) -> u8 {
        self.from
    }

    #[inline]
    pub const fn to(self) -> u8 {
        self.to
    }

    #[inline]
    pub fn contains(self, iv: u8) -> bool {
        (self.from..=self.to).contains(&iv)
    }

    #[inline]
    pub fn overlaps(self, other: IvRange) -> bool {
        self.from.max(other.from) <= self.to.min(other.to)
    }

    /// Bounds covering both ranges.
    pub fn union(self, other: IvRange) -> IvRange {
        IvRange {
            from: self.from.min(other.from),
            to: self.to.max(other.to),
        }
    }

    pub fn ivs(self) -> RangeInclusive<u8> {
        self.from..=self.to
    }

    pub fn len(self) -> usize {
        usize::from(self.to - self.from) + 1
    }
}

/// Union of two optional ranges. An empty side never contributes a bound.
pub fn merge_ranges(a: Option<IvRange>, b: Option<IvRange>) -> Option<IvRange> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn ranges_overlap(a: Option<IvRange>, b: Option<IvRange>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.overlaps(b))
}

/// Feasible IVs for one stat under each nature variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IvRangeSet {
    pub ranges: NatureMap<Option<IvRange>>,
    /// Bounds across every non-empty variant.
    pub combined: Option<IvRange>,
}

impl IvRangeSet {
    /// Nothing observed yet.
    pub const UNCONSTRAINED: IvRangeSet = IvRangeSet {
        ranges: NatureMap::new(Some(IvRange::FULL), Some(IvRange::FULL), Some(IvRange::FULL)),
        combined: Some(IvRange::FULL),
    };

    pub fn from_ranges(ranges: NatureMap<Option<IvRange>>) -> Self {
        let combined = ranges.0.iter().copied().fold(None, merge_ranges);
        Self { ranges, combined }
    }

    #[inline]
    pub fn get(&self, variant: NatureVariant) -> Option<IvRange> {
        self.ranges[variant]
    }

    /// Whether `variant` still has any feasible IV.
    #[inline]
    pub fn has(&self, variant: NatureVariant) -> bool {
        self.ranges[variant].is_some()
    }
}

impl Default for IvRangeSet {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

/// Overrides for IV inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IvInferenceOptions {
    /// The IV is known outright (fixed-IV encounters, inherited IVs).
    pub static_iv: Option<u8>,
    /// Stat the nature is known to boost.
    pub boosted_stat: Option<Stat>,
    /// Stat the nature is known to reduce.
    pub reduced_stat: Option<Stat>,
    /// Required for Let's Go, which folds friendship into every non-HP stat.
    pub friendship: Option<u8>,
}

impl IvInferenceOptions {
    pub fn confirmed_nature(&self) -> ConfirmedNature {
        ConfirmedNature::new(self.reduced_stat, self.boosted_stat)
    }
}

/// Observed values of one stat, keyed by level, for one evolution stage.
pub type StatObservations = BTreeMap<u8, u16>;

fn friendship_for(gen: Generation, stat: Stat, friendship: Option<u8>) -> CalcResult<u8> {
    match (gen.stat_formula(), friendship) {
        (StatFormula::LetsGo, None) if !stat.is_hp() => Err(CalcError::missing("friendship")),
        (_, friendship) => Ok(friendship.unwrap_or(0)),
    }
}

/// Determine which IVs can produce the observed values of `stat`.
///
/// `base_stats[i]` is the base stat during evolution stage `i` and
/// `observations[i]` holds the values seen at that stage. `evs_by_level`
/// gives the EVs at each observed level, defaulting to zero.
///
/// Levels are walked in increasing order within each stage. A variant whose
/// range becomes empty stays empty.
pub fn calculate_possible_iv_range(
    stat: Stat,
    base_stats: &[u16],
    observations: &[StatObservations],
    evs_by_level: &BTreeMap<u8, u16>,
    gen: Generation,
    options: &IvInferenceOptions,
) -> CalcResult<IvRangeSet> {
    if let Some(iv) = options.static_iv {
        let point = IvRange::point(iv)?;
        let admissible = possible_variants_for_stat(stat, options.confirmed_nature());

        return Ok(IvRangeSet {
            ranges: NatureMap::from_fn(|variant| admissible.has(variant).then_some(point)),
            combined: Some(point),
        });
    }

    if observations.len() > base_stats.len() {
        return Err(CalcError::invalid(
            "baseStats",
            format!(
                "{} evolution stages observed but only {} base stats given",
                observations.len(),
                base_stats.len()
            ),
        ));
    }

    let friendship = friendship_for(gen, stat, options.friendship)?;
    for &evs in evs_by_level.values() {
        check_evs(gen, evs)?;
    }
    for &level in observations.iter().flat_map(|stage| stage.keys()) {
        if !(1..=100).contains(&level) {
            return Err(CalcError::invalid("level", format!("{level} is outside 1..=100")));
        }
    }

    tracing::debug!(
        ?stat,
        %gen,
        stages = observations.len(),
        samples = observations.iter().map(BTreeMap::len).sum::<usize>(),
        "inferring IV range"
    );

    let ranges = NatureMap::from_fn(|variant| {
        let multiplier = if stat.is_hp() {
            NatureVariant::Neutral.multiplier()
        } else {
            variant.multiplier()
        };

        let mut feasible = Some(IvRange::FULL);

        for (stage, samples) in observations.iter().enumerate() {
            for (&level, &value) in samples {
                let Some(current) = feasible else { break };

                let inputs = StatInputs {
                    level,
                    base: base_stats[stage],
                    ev: evs_by_level.get(&level).copied().unwrap_or(0),
                    gen,
                    friendship,
                };

                feasible = IvRange::spanning(
                    current
                        .ivs()
                        .filter(|&iv| inputs.evaluate(stat, iv, multiplier) == value),
                );

                if feasible.is_none() {
                    tracing::trace!(?stat, ?variant, level, value, "no IV reproduces observation");
                }
            }
        }

        feasible
    });

    Ok(IvRangeSet::from_ranges(ranges))
}

/// Stat values reachable at one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValuePossibilities {
    /// Values reachable by any IV under an admissible nature variant.
    pub possible: Vec<u16>,
    /// Values reachable within the inferred IV ranges.
    pub valid: Vec<u16>,
}

fn push_unique(values: &mut Vec<u16>, value: u16) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Every value `stat` can take at `inputs.level`, given what has been
/// inferred so far. Both lists are deduplicated in first-seen order.
pub fn calculate_all_possible_stat_values(
    stat: Stat,
    inputs: &StatInputs,
    range_set: &IvRangeSet,
    confirmed: ConfirmedNature,
) -> StatValuePossibilities {
    let variants = if stat.is_hp() {
        NatureVariants::NEUTRAL
    } else {
        possible_variants_for_stat(stat, confirmed)
    };

    let mut result = StatValuePossibilities::default();

    for variant in variants.variants() {
        let multiplier = variant.multiplier();

        for iv in IvRange::FULL.ivs() {
            push_unique(&mut result.possible, inputs.evaluate(stat, iv, multiplier));
        }

        if let Some(range) = range_set.get(variant) {
            for iv in range.ivs() {
                push_unique(&mut result.valid, inputs.evaluate(stat, iv, multiplier));
            }
        }
    }

    result
}

/// Anything that records which IVs produced it under each nature variant.
pub trait IvCoverage {
    fn iv_coverage(&self) -> &NatureMap<Option<IvRange>>;
}

impl<K, T: IvCoverage> IvCoverage for (K, T) {
    fn iv_coverage(&self) -> &NatureMap<Option<IvRange>> {
        self.1.iv_coverage()
    }
}

impl<T: IvCoverage + ?Sized> IvCoverage for &T {
    fn iv_coverage(&self) -> &NatureMap<Option<IvRange>> {
        (**self).iv_coverage()
    }
}

fn is_within_range<T: IvCoverage>(
    result: &T,
    confirmed: ConfirmedNature,
    stat: Stat,
    range_set: &IvRangeSet,
) -> bool {
    let coverage = result.iv_coverage();
    let overlaps = |variant: NatureVariant| ranges_overlap(coverage[variant], range_set.get(variant));

    let ConfirmedNature { reduced, boosted } = confirmed;
    if reduced == Some(stat) && boosted != Some(stat) {
        return overlaps(NatureVariant::Negative);
    }
    if boosted == Some(stat) && reduced != Some(stat) {
        return overlaps(NatureVariant::Positive);
    }

    possible_nature_adjustments_for_stat(range_set, stat, confirmed)
        .variants()
        .any(overlaps)
}

/// Keep only the results that are still consistent with the inferred IV
/// ranges of `stat`.
pub fn filter_to_stat_range<I, T, B>(
    results: I,
    confirmed: ConfirmedNature,
    stat: Stat,
    range_set: &IvRangeSet,
) -> B
where
    I: IntoIterator<Item = T>,
    T: IvCoverage,
    B: FromIterator<T>,
{
    results
        .into_iter()
        .filter(|result| is_within_range(result, confirmed, stat, range_set))
        .collect()
}
