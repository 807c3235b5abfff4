//! Shared helpers for the integration tests.

#![allow(dead_code)]

use poke_calc::damage::generations::Generation;
use poke_calc::iv_ranges::IvRange;
use poke_calc::nature::NatureMap;
use poke_calc::DamageRangeOptions;
use serde::Deserialize;

/// Root structure of `tests/fixtures/damage_ranges.json`.
#[derive(Deserialize)]
pub struct RangeFixture {
    #[allow(dead_code)]
    pub meta: Option<serde_json::Value>,
    pub cases: Vec<RangeCase>,
}

/// One damage-range request and its compacted result.
#[derive(Deserialize, Debug, Clone)]
pub struct RangeCase {
    pub id: String,
    pub description: Option<String>,
    pub options: DamageRangeOptions,
    pub expected: Vec<ExpectedRange>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedRange {
    pub stat_from: u16,
    pub stat_to: u16,
    pub negative: Option<IvRange>,
    pub neutral: Option<IvRange>,
    pub positive: Option<IvRange>,
    pub damage_values: Vec<u32>,
}

impl ExpectedRange {
    pub fn ivs(&self) -> NatureMap<Option<IvRange>> {
        NatureMap::new(self.negative, self.neutral, self.positive)
    }
}

pub fn fixture_path() -> String {
    format!("{}/tests/fixtures/damage_ranges.json", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture() -> RangeFixture {
    let path = fixture_path();
    let file = std::fs::File::open(&path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));
    serde_json::from_reader(std::io::BufReader::new(file)).expect("failed to parse damage_ranges.json")
}

/// The level 25 Prinplup Bubble Beam request most tests start from.
pub fn prinplup() -> DamageRangeOptions {
    DamageRangeOptions::new()
        .level(25)
        .base_stat(81)
        .evs(16)
        .move_power(65)
        .opponent_stat(62)
        .generation(Generation::Gen4)
        .stab(true)
}

pub fn iv(from: u8, to: u8) -> Option<IvRange> {
    Some(IvRange::new(from, to).expect("valid IV range"))
}
