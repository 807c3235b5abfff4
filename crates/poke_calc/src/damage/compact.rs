//! Compaction of range segments across nature variants.

use super::formula::DamageRolls;
use super::ranges::RangeSegment;
use crate::iv_ranges::{merge_ranges, IvCoverage, IvRange};
use crate::nature::{NatureMap, NatureVariant};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Segments from any nature variant that roll identical damage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactRange {
    pub damage_values: DamageRolls,
    pub min_damage: u32,
    pub max_damage: u32,
    pub stat_from: u16,
    pub stat_to: u16,
    /// IVs contributing from each variant. `None` when the variant never
    /// produces these rolls.
    pub ivs: NatureMap<Option<IvRange>>,
}

impl CompactRange {
    fn from_segment(variant: NatureVariant, segment: &RangeSegment) -> Self {
        let mut ivs = NatureMap::new(None, None, None);
        ivs[variant] = Some(segment.ivs);

        Self {
            damage_values: segment.damage_values,
            min_damage: segment.min_damage(),
            max_damage: segment.max_damage(),
            stat_from: segment.stat,
            stat_to: segment.stat,
            ivs,
        }
    }

    fn absorb(&mut self, variant: NatureVariant, segment: &RangeSegment) {
        self.stat_from = self.stat_from.min(segment.stat);
        self.stat_to = self.stat_to.max(segment.stat);
        self.ivs[variant] = merge_ranges(self.ivs[variant], Some(segment.ivs));
    }

    /// Number of rolls dealing at least `health`.
    pub fn successes(&self, health: u32) -> usize {
        self.damage_values.iter().filter(|&&d| d >= health).count()
    }
}

impl IvCoverage for CompactRange {
    fn iv_coverage(&self) -> &NatureMap<Option<IvRange>> {
        &self.ivs
    }
}

/// Merge segments whose rolls are element-wise equal, across all three
/// variants, sorted by lowest stat.
pub fn combine_identical_lines(ranges: &NatureMap<Vec<RangeSegment>>) -> Vec<CompactRange> {
    let mut index: HashMap<DamageRolls, usize> = HashMap::new();
    let mut compact: Vec<CompactRange> = Vec::new();

    for variant in NatureVariant::ALL {
        for segment in &ranges[variant] {
            match index.get(&segment.damage_values) {
                Some(&i) => compact[i].absorb(variant, segment),
                None => {
                    index.insert(segment.damage_values, compact.len());
                    compact.push(CompactRange::from_segment(variant, segment));
                }
            }
        }
    }

    compact.sort_by_key(|range| range.stat_from);
    compact
}

/// Compact ranges sharing a one-hit knockout success count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneShotGroup {
    pub successes: usize,
    pub stat_from: u16,
    pub stat_to: u16,
    pub ivs: NatureMap<Option<IvRange>>,
    pub component_results: Vec<CompactRange>,
}

impl IvCoverage for OneShotGroup {
    fn iv_coverage(&self) -> &NatureMap<Option<IvRange>> {
        &self.ivs
    }
}

/// Group compact ranges by how many of their rolls knock out a target with
/// `health` HP, keyed by that count.
pub fn calculate_kill_ranges(
    ranges: &NatureMap<Vec<RangeSegment>>,
    health: u32,
) -> BTreeMap<usize, OneShotGroup> {
    tracing::debug!(health, "calculating kill ranges");

    let mut groups: BTreeMap<usize, OneShotGroup> = BTreeMap::new();

    for range in combine_identical_lines(ranges) {
        let successes = range.successes(health);

        match groups.get_mut(&successes) {
            Some(group) => {
                group.stat_from = group.stat_from.min(range.stat_from);
                group.stat_to = group.stat_to.max(range.stat_to);
                for variant in NatureVariant::ALL {
                    group.ivs[variant] = merge_ranges(group.ivs[variant], range.ivs[variant]);
                }
                group.component_results.push(range);
            }
            None => {
                groups.insert(
                    successes,
                    OneShotGroup {
                        successes,
                        stat_from: range.stat_from,
                        stat_to: range.stat_to,
                        ivs: range.ivs,
                        component_results: vec![range],
                    },
                );
            }
        }
    }

    groups
}
