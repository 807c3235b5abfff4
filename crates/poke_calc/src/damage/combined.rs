//! Multi-hit knockout odds.
//!
//! Every assignment of one roll per hit is combined with every placement of
//! critical hits among the hits, so the work grows as `R^N * 2^N`. `N` is
//! capped at [`MAX_COMBINED_HITS`].

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Largest number of hits that will be enumerated.
pub const MAX_COMBINED_HITS: usize = 5;

/// Options for `calculate_combined_damage`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombinedDamageOptions {
    /// Rolls to use in place of the regular ones when a hit is critical.
    ///
    /// Critical hits ignore the attacker's negative stages and the defender's
    /// positive ones, so callers can supply rolls computed at neutral stages.
    pub crit_adjusted_values: Vec<Option<Vec<u32>>>,
    pub crit_multiplier: f64,
    /// 16 through Gen 6, 24 afterwards.
    pub crit_chance_denominator: u32,
}

impl Default for CombinedDamageOptions {
    fn default() -> Self {
        Self {
            crit_adjusted_values: Vec::new(),
            crit_multiplier: 1.5,
            crit_chance_denominator: 16,
        }
    }
}

/// Outcome for one number of critical hits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedDamageOdds {
    pub crit_count: usize,
    /// Probability of one specific placement of `crit_count` crits.
    pub odds: f64,
    /// Number of placements of `crit_count` crits.
    pub binomial_coefficient: u64,
    /// Roll assignments and crit placements reaching the threshold.
    pub successes: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedOdds {
    /// One entry per crit count, `0..=N`.
    pub entries: Vec<CombinedDamageOdds>,
    pub rolls_per_hit: usize,
    /// Roll assignments enumerated: the product of every hit's roll count.
    pub roll_assignments: u64,
}

impl CombinedOdds {
    /// Probability that the hits reach the threshold.
    pub fn kill_probability(&self) -> f64 {
        if self.entries.is_empty() || self.roll_assignments == 0 {
            return 0.0;
        }

        self.entries
            .iter()
            .map(|entry| entry.odds * entry.successes as f64)
            .sum::<f64>()
            / self.roll_assignments as f64
    }
}

fn binomial(n: usize, k: usize) -> u64 {
    (0..k).fold(1u64, |acc, i| acc * (n - i) as u64 / (i as u64 + 1))
}

/// Count how many ways a sequence of hits reaches `threshold` total damage,
/// split by number of critical hits.
///
/// Every roll set is truncated to the length of the first.
pub fn calculate_combined_damage<S: AsRef<[u32]>>(
    roll_sets: &[S],
    threshold: u32,
    options: &CombinedDamageOptions,
) -> CalcResult<CombinedOdds> {
    let hits = roll_sets.len();
    if hits > MAX_COMBINED_HITS {
        return Err(CalcError::TooManyHits {
            hits,
            max: MAX_COMBINED_HITS,
        });
    }
    if options.crit_chance_denominator == 0 {
        return Err(CalcError::invalid("critChanceDenominator", "must be positive"));
    }

    let rolls_per_hit = roll_sets.first().map_or(0, |set| set.as_ref().len());

    tracing::debug!(hits, rolls_per_hit, threshold, "calculating combined damage");

    // (regular, critical) damage for each roll of each hit.
    let values: Vec<Vec<(u64, u64)>> = roll_sets
        .iter()
        .enumerate()
        .map(|(hit, set)| {
            let overlay = options.crit_adjusted_values.get(hit).and_then(Option::as_ref);
            set.as_ref()
                .iter()
                .take(rolls_per_hit)
                .enumerate()
                .map(|(roll, &value)| {
                    let adjusted = overlay.and_then(|o| o.get(roll)).copied().unwrap_or(value);
                    let base = if adjusted != 0 { adjusted } else { value };
                    let crit = (f64::from(base) * options.crit_multiplier).trunc() as u64;
                    (u64::from(value), crit)
                })
                .collect()
        })
        .collect();

    let mut successes = vec![0u64; hits + 1];

    if hits > 0 && values.iter().all(|set| !set.is_empty()) {
        let threshold = u64::from(threshold);
        let mut odometer = vec![0usize; hits];

        loop {
            for mask in 0u32..(1 << hits) {
                let total: u64 = odometer
                    .iter()
                    .enumerate()
                    .map(|(hit, &roll)| {
                        let (value, crit) = values[hit][roll];
                        if mask & (1 << hit) != 0 {
                            crit
                        } else {
                            value
                        }
                    })
                    .sum();

                if total >= threshold {
                    successes[mask.count_ones() as usize] += 1;
                }
            }

            // Advance to the next roll assignment, last hit fastest.
            let Some(hit) = (0..hits).rev().find(|&hit| odometer[hit] + 1 < values[hit].len()) else {
                break;
            };
            odometer[hit] += 1;
            odometer[hit + 1..].iter_mut().for_each(|roll| *roll = 0);
        }
    }

    let p = 1.0 / f64::from(options.crit_chance_denominator);
    let entries = (0..=hits)
        .map(|k| CombinedDamageOdds {
            crit_count: k,
            odds: p.powi(k as i32) * (1.0 - p).powi((hits - k) as i32),
            binomial_coefficient: binomial(hits, k),
            successes: successes[k],
        })
        .collect();

    Ok(CombinedOdds {
        entries,
        rolls_per_hit,
        roll_assignments: values.iter().map(|set| set.len() as u64).product(),
    })
}
