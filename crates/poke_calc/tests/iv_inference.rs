//! IV inference against stat histories generated from known IVs.

mod common;

use common::iv;
use poke_calc::core_data::{Stat, StatMap};
use poke_calc::damage::generations::Generation;
use poke_calc::iv_ranges::{calculate_possible_iv_range, IvInferenceOptions, IvRangeSet, StatObservations};
use poke_calc::nature::{determine_nature_status, nature_by_name, ConfirmedNature, NatureStatus, NatureVariant};
use poke_calc::stats::StatInputs;
use std::collections::BTreeMap;

const LEVELS: [u8; 5] = [10, 20, 30, 40, 50];

fn history(stat: Stat, base: u16, iv: u8, nature: f64, gen: Generation) -> StatObservations {
    LEVELS
        .iter()
        .map(|&level| {
            let inputs = StatInputs {
                level,
                base,
                ev: 0,
                gen,
                friendship: 0,
            };
            (level, inputs.evaluate(stat, iv, nature))
        })
        .collect()
}

fn infer(stat: Stat, base: u16, samples: StatObservations, gen: Generation) -> IvRangeSet {
    calculate_possible_iv_range(
        stat,
        &[base],
        &[samples],
        &BTreeMap::new(),
        gen,
        &IvInferenceOptions::default(),
    )
    .expect("valid inference input")
}

#[test]
fn test_true_iv_is_always_feasible() {
    let gens = [Generation::Gen3, Generation::Gen5, Generation::Gen9, Generation::Gen1];

    for gen in gens {
        for base in [45u16, 81, 130] {
            for true_iv in [0u8, 7, 16, 31] {
                for variant in NatureVariant::ALL {
                    let true_iv = if gen == Generation::Gen1 { true_iv.min(15) } else { true_iv };
                    let samples = history(Stat::Speed, base, true_iv, variant.multiplier(), gen);
                    let set = infer(Stat::Speed, base, samples, gen);

                    let range = set.get(variant).expect("true variant stays feasible");
                    assert!(range.contains(true_iv), "{gen} base {base} iv {true_iv} {variant:?}");
                    assert!(set.combined.is_some_and(|c| c.contains(true_iv)));
                }
            }
        }
    }
}

#[test]
fn test_every_inferred_iv_reproduces_every_sample() {
    let levels = [12u8, 25, 41, 58];
    let cases = [
        (Generation::Gen2, [500u16, 4000, 20000, 50000]),
        (Generation::Gen4, [0, 40, 120, 252]),
        (Generation::Gen7, [4, 84, 164, 252]),
        (Generation::LetsGo, [20, 60, 120, 200]),
    ];
    let options = IvInferenceOptions {
        friendship: Some(180),
        ..Default::default()
    };

    for (gen, evs) in cases {
        let evs_by_level: BTreeMap<u8, u16> = levels.into_iter().zip(evs).collect();

        for stat in [Stat::Hp, Stat::Attack, Stat::Speed] {
            for true_variant in NatureVariant::ALL {
                for true_iv in [3u8, 18, 30] {
                    let inputs_at = |level: u8| StatInputs {
                        level,
                        base: 77,
                        ev: evs_by_level[&level],
                        gen,
                        friendship: 180,
                    };
                    let samples: StatObservations = levels
                        .iter()
                        .map(|&level| {
                            let value = inputs_at(level).evaluate(stat, true_iv, true_variant.multiplier());
                            (level, value)
                        })
                        .collect();

                    let set = calculate_possible_iv_range(
                        stat,
                        &[77],
                        &[samples.clone()],
                        &evs_by_level,
                        gen,
                        &options,
                    )
                    .unwrap();
                    assert!(set.has(true_variant), "{gen} {stat:?} {true_variant:?} {true_iv}");

                    for variant in NatureVariant::ALL {
                        let Some(range) = set.get(variant) else { continue };
                        let multiplier = if stat.is_hp() { 1.0 } else { variant.multiplier() };

                        for iv in range.ivs() {
                            for (&level, &value) in &samples {
                                assert_eq!(
                                    inputs_at(level).evaluate(stat, iv, multiplier),
                                    value,
                                    "{gen} {stat:?} {variant:?} iv {iv} level {level}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_history_determines_nature() {
    let gen = Generation::Gen5;
    let adamant = nature_by_name("Adamant").expect("catalogued nature");

    let bases = StatMap::new([70, 100, 80, 60, 70, 90]);
    let ivs = StatMap::new([12, 31, 15, 0, 20, 10]);

    let ranges = StatMap::from_fn(|stat| {
        let samples = history(stat, bases[stat], ivs[stat], adamant.multiplier(stat), gen);
        infer(stat, bases[stat], samples, gen)
    });

    assert_eq!(ranges[Stat::Attack].ranges.0, [None, None, iv(30, 31)]);
    assert_eq!(ranges[Stat::SpAttack].ranges.0, [iv(0, 1), None, None]);
    assert_eq!(ranges[Stat::Defense].ranges.0, [None, iv(15, 15), None]);

    let status = determine_nature_status(&ranges, ConfirmedNature::UNKNOWN);
    assert_eq!(
        status,
        NatureStatus::Determined(ConfirmedNature::new(Some(Stat::SpAttack), Some(Stat::Attack)))
    );
}

#[test]
fn test_contradictory_history_empties_every_variant() {
    let mut samples = history(Stat::Defense, 80, 15, 1.0, Generation::Gen7);
    // A stat cannot drop while levelling up.
    samples.insert(60, 10);

    let set = infer(Stat::Defense, 80, samples, Generation::Gen7);
    assert_eq!(set.combined, None);
    assert!(NatureVariant::ALL.into_iter().all(|variant| !set.has(variant)));
}

#[test]
fn test_evolution_stages_use_their_own_base() {
    let gen = Generation::Gen4;
    let stage = |base: u16, levels: &[u8]| -> StatObservations {
        levels
            .iter()
            .map(|&level| {
                let inputs = StatInputs { level, base, ev: 0, gen, friendship: 0 };
                (level, inputs.evaluate(Stat::Attack, 21, 1.0))
            })
            .collect()
    };

    let set = calculate_possible_iv_range(
        Stat::Attack,
        &[45, 85],
        &[stage(45, &[10, 16]), stage(85, &[17, 30, 45])],
        &BTreeMap::new(),
        gen,
        &IvInferenceOptions::default(),
    )
    .unwrap();

    assert!(set.get(NatureVariant::Neutral).is_some_and(|range| range.contains(21)));
}

#[test]
fn test_more_stages_than_base_stats_is_rejected() {
    let samples = history(Stat::Speed, 90, 10, 1.0, Generation::Gen5);
    let result = calculate_possible_iv_range(
        Stat::Speed,
        &[90],
        &[samples.clone(), samples],
        &BTreeMap::new(),
        Generation::Gen5,
        &IvInferenceOptions::default(),
    );
    assert!(result.is_err());
}
