//! Hidden Power type and base power.
//!
//! Both are read from one bit of each IV: the type from the lowest bit, the
//! Gen 3-5 base power from the second lowest. With only IV ranges known, the
//! most probable bit combination is picked instead.

use crate::core_data::{Stat, StatMap, Type};
use crate::iv_ranges::{IvRange, IvRangeSet};
use crate::nature::{ConfirmedNature, NatureVariant};

/// Types in Hidden Power index order. Normal and Fairy are unreachable.
const HIDDEN_POWER_TYPES: [Type; 16] = [
    Type::Fighting,
    Type::Flying,
    Type::Poison,
    Type::Ground,
    Type::Rock,
    Type::Bug,
    Type::Ghost,
    Type::Steel,
    Type::Fire,
    Type::Water,
    Type::Grass,
    Type::Electric,
    Type::Psychic,
    Type::Ice,
    Type::Dragon,
    Type::Dark,
];

/// Which IV bit feeds the calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IvBit {
    Lowest,
    SecondLowest,
}

impl IvBit {
    #[inline]
    fn is_set(self, iv: u8) -> bool {
        match self {
            IvBit::Lowest => iv % 2 == 1,
            IvBit::SecondLowest => matches!(iv % 4, 2 | 3),
        }
    }
}

/// Weight of each stat's bit. Speed sits between Defense and Sp. Attack.
const fn stat_weight(stat: Stat) -> u32 {
    match stat {
        Stat::Hp => 1,
        Stat::Attack => 2,
        Stat::Defense => 4,
        Stat::Speed => 8,
        Stat::SpAttack => 16,
        Stat::SpDefense => 32,
    }
}

fn weighted_bits(bits: &StatMap<bool>) -> u32 {
    bits.iter()
        .filter(|(_, &set)| set)
        .map(|(stat, _)| stat_weight(stat))
        .sum()
}

fn type_from_bits(bits: &StatMap<bool>) -> Type {
    HIDDEN_POWER_TYPES[(weighted_bits(bits) * 15 / 63) as usize]
}

fn base_power_from_bits(bits: &StatMap<bool>) -> u8 {
    (weighted_bits(bits) * 40 / 63 + 30) as u8
}

/// Hidden Power type for known IVs.
pub fn hidden_power_type_from_ivs(ivs: &StatMap<u8>) -> Type {
    type_from_bits(&StatMap::from_fn(|stat| IvBit::Lowest.is_set(ivs[stat])))
}

/// Gen 3-5 Hidden Power base power for known IVs, between 30 and 70.
pub fn hidden_power_base_power_from_ivs(ivs: &StatMap<u8>) -> u8 {
    base_power_from_bits(&StatMap::from_fn(|stat| IvBit::SecondLowest.is_set(ivs[stat])))
}

fn collect_ivs(values: &mut Vec<u8>, range: Option<IvRange>) {
    for iv in range.into_iter().flat_map(IvRange::ivs) {
        if !values.contains(&iv) {
            values.push(iv);
        }
    }
}

/// Every IV still feasible for `stat` under the variants the confirmed
/// nature allows.
fn feasible_ivs(range_set: &IvRangeSet, stat: Stat, confirmed: ConfirmedNature) -> Vec<u8> {
    let mut values = Vec::new();

    if confirmed.reduced == Some(stat) {
        collect_ivs(&mut values, range_set.get(NatureVariant::Negative));
    } else if confirmed.boosted == Some(stat) {
        collect_ivs(&mut values, range_set.get(NatureVariant::Positive));
    } else {
        if confirmed.reduced.is_none() {
            collect_ivs(&mut values, range_set.get(NatureVariant::Negative));
        }
        collect_ivs(&mut values, range_set.get(NatureVariant::Neutral));
        if confirmed.boosted.is_none() {
            collect_ivs(&mut values, range_set.get(NatureVariant::Positive));
        }
    }

    values
}

/// Fraction of feasible IVs for each stat whose bit is set and unset.
fn bit_fractions(ivs: &StatMap<IvRangeSet>, confirmed: ConfirmedNature, bit: IvBit) -> StatMap<[f64; 2]> {
    StatMap::from_fn(|stat| {
        let values = feasible_ivs(&ivs[stat], stat, confirmed);
        if values.is_empty() {
            return [0.0, 0.0];
        }

        let set = values.iter().filter(|&&iv| bit.is_set(iv)).count() as f64;
        let total = values.len() as f64;
        [(total - set) / total, set / total]
    })
}

fn most_probable_bits(ivs: &StatMap<IvRangeSet>, confirmed: ConfirmedNature, bit: IvBit) -> Option<StatMap<bool>> {
    let fractions = bit_fractions(ivs, confirmed, bit);
    let mut best: Option<(f64, StatMap<bool>)> = None;

    for mask in 0u32..64 {
        let bits = StatMap::from_fn(|stat| mask & (1 << stat.index()) != 0);
        let probability: f64 = bits
            .iter()
            .map(|(stat, &set)| fractions[stat][usize::from(set)])
            .product();

        let best_so_far = best.as_ref().map_or(0.0, |(p, _)| *p);
        if probability > best_so_far {
            best = Some((probability, bits));
        }
    }

    tracing::trace!(?bit, found = best.is_some(), "most probable hidden power bits");

    best.map(|(_, bits)| bits)
}

/// Most probable Hidden Power type given the inferred IV ranges of every
/// stat, or `None` when no combination is feasible.
pub fn calculate_hidden_power_type(ivs: &StatMap<IvRangeSet>, confirmed: ConfirmedNature) -> Option<Type> {
    most_probable_bits(ivs, confirmed, IvBit::Lowest).map(|bits| type_from_bits(&bits))
}

/// Most probable Gen 3-5 Hidden Power base power.
pub fn calculate_hidden_power_base_power(ivs: &StatMap<IvRangeSet>, confirmed: ConfirmedNature) -> Option<u8> {
    most_probable_bits(ivs, confirmed, IvBit::SecondLowest).map(|bits| base_power_from_bits(&bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nature::NatureMap;

    fn point_set(iv: u8) -> IvRangeSet {
        let point = Some(IvRange::point(iv).unwrap());
        IvRangeSet::from_ranges(NatureMap::new(point, point, point))
    }

    #[test]
    fn test_type_from_known_ivs() {
        assert_eq!(hidden_power_type_from_ivs(&StatMap([0; 6])), Type::Fighting);
        assert_eq!(hidden_power_type_from_ivs(&StatMap([31; 6])), Type::Dark);
        assert_eq!(hidden_power_type_from_ivs(&StatMap([0, 1, 2, 3, 4, 5])), Type::Ghost);
    }

    #[test]
    fn test_base_power_from_known_ivs() {
        assert_eq!(hidden_power_base_power_from_ivs(&StatMap([0; 6])), 30);
        assert_eq!(hidden_power_base_power_from_ivs(&StatMap([31; 6])), 70);
        assert_eq!(hidden_power_base_power_from_ivs(&StatMap([0, 1, 2, 3, 4, 5])), 42);
    }

    #[test]
    fn test_exact_ranges_match_known_ivs() {
        let ivs = [30, 31, 31, 30, 31, 31];
        let sets = StatMap(ivs.map(point_set));

        assert_eq!(
            calculate_hidden_power_type(&sets, ConfirmedNature::UNKNOWN),
            Some(hidden_power_type_from_ivs(&StatMap(ivs)))
        );
        assert_eq!(
            calculate_hidden_power_base_power(&sets, ConfirmedNature::UNKNOWN),
            Some(hidden_power_base_power_from_ivs(&StatMap(ivs)))
        );
    }

    #[test]
    fn test_confirmed_nature_picks_variant() {
        let mut sets = StatMap([point_set(0); 6]);
        // Reduced Attack is known, so only the negative range counts.
        sets[Stat::Attack] = IvRangeSet::from_ranges(NatureMap::new(
            Some(IvRange::point(1).unwrap()),
            Some(IvRange::point(0).unwrap()),
            None,
        ));

        let confirmed = ConfirmedNature::new(Some(Stat::Attack), Some(Stat::Speed));
        // Only Attack's bit is set: 2 * 15 / 63 = 0.
        assert_eq!(calculate_hidden_power_type(&sets, confirmed), Some(Type::Fighting));
        assert_eq!(feasible_ivs(&sets[Stat::Attack], Stat::Attack, confirmed), vec![1]);
        assert_eq!(
            feasible_ivs(&sets[Stat::Attack], Stat::Attack, ConfirmedNature::UNKNOWN),
            vec![1, 0]
        );
    }

    #[test]
    fn test_no_feasible_ivs() {
        let mut sets = StatMap([IvRangeSet::UNCONSTRAINED; 6]);
        sets[Stat::Speed] = IvRangeSet::from_ranges(NatureMap::new(None, None, None));

        assert_eq!(calculate_hidden_power_type(&sets, ConfirmedNature::UNKNOWN), None);
        assert_eq!(calculate_hidden_power_base_power(&sets, ConfirmedNature::UNKNOWN), None);
    }

    #[test]
    fn test_unconstrained_ties_keep_first() {
        let sets = StatMap([IvRangeSet::UNCONSTRAINED; 6]);
        // Every combination is equally likely, so the all-clear mask wins.
        assert_eq!(calculate_hidden_power_type(&sets, ConfirmedNature::UNKNOWN), Some(Type::Fighting));
    }
}
