//! Multi-hit knockout odds over real damage rolls.

mod common;

use common::prinplup;
use poke_calc::damage::{
    calculate_combined_damage, calculate_damage_ranges, CombinedDamageOptions, DamageRolls,
};
use poke_calc::nature::NatureVariant;

fn neutral_rolls() -> DamageRolls {
    let ranges = calculate_damage_ranges(&prinplup()).unwrap();
    ranges[NatureVariant::Neutral][0].damage_values
}

#[test]
fn test_two_hit_knockout() {
    let rolls = neutral_rolls();
    let odds = calculate_combined_damage(&[rolls, rolls], 35, &CombinedDamageOptions::default()).unwrap();

    let successes: Vec<u64> = odds.entries.iter().map(|entry| entry.successes).collect();
    assert_eq!(successes, vec![80, 512, 256]);
    assert!((odds.kill_probability() - 0.395751953125).abs() < 1e-12);
}

#[test]
fn test_three_hit_knockout() {
    let rolls = neutral_rolls();
    let odds = calculate_combined_damage(&[rolls; 3], 54, &CombinedDamageOptions::default()).unwrap();

    let successes: Vec<u64> = odds.entries.iter().map(|entry| entry.successes).collect();
    assert_eq!(successes, vec![536, 12288, 12288, 4096]);
    assert!((odds.kill_probability() - 0.283850193023681).abs() < 1e-9);
}

#[test]
fn test_placement_probabilities_sum_to_one() {
    let rolls = neutral_rolls();

    for hits in 1..=4 {
        let sets = vec![rolls; hits];
        let odds = calculate_combined_damage(&sets, 40, &CombinedDamageOptions::default()).unwrap();

        assert_eq!(odds.entries.len(), hits + 1);
        let total: f64 = odds
            .entries
            .iter()
            .map(|entry| entry.binomial_coefficient as f64 * entry.odds)
            .sum();
        assert!((total - 1.0).abs() < 1e-12, "{hits} hits");
    }
}

#[test]
fn test_lower_threshold_never_hurts() {
    let rolls = neutral_rolls();
    let options = CombinedDamageOptions::default();

    let mut previous = 0.0;
    for threshold in (20..=60).rev() {
        let odds = calculate_combined_damage(&[rolls, rolls], threshold, &options).unwrap();
        let probability = odds.kill_probability();

        assert!((0.0..=1.0).contains(&probability));
        assert!(probability >= previous, "threshold {threshold}");
        previous = probability;
    }
    assert_eq!(previous, 1.0);
}

#[test]
fn test_no_hits() {
    let odds = calculate_combined_damage::<DamageRolls>(&[], 10, &CombinedDamageOptions::default()).unwrap();
    assert_eq!(odds.entries.len(), 1);
    assert_eq!(odds.entries[0].successes, 0);
    assert_eq!(odds.kill_probability(), 0.0);
}
