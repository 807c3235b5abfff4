//! Generation-specific mechanics abstraction.
//!
//! Each rule set implements the `GenMechanics` trait, providing the constants
//! and the modifier plan specific to that generation. Trait defaults reflect
//! Gen 9; older rule sets override only what differs.
//!
//! `Generation` is the tag callers pass around. It dispatches to the rule set
//! that owns the title, so Gen 1 and Gen 2 share `Gen1`, and Gens 7 through 9
//! share `Gen9`.

mod bdsp;
mod gen1;
mod gen3;
mod gen4;
mod gen5;
mod gen6;
mod gen9;
mod lgpe;

pub use bdsp::Bdsp;
pub use gen1::Gen1;
pub use gen3::Gen3;
pub use gen4::Gen4;
pub use gen5::Gen5;
pub use gen6::Gen6;
pub use gen9::Gen9;
pub use lgpe::LetsGo;

use super::modifier::ModifierSlot;
use crate::error::CalcError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Which stat formula family a generation uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatFormula {
    /// Gens 1 and 2: DVs, square-root stat experience, no natures.
    Classic,
    /// Gen 3 onward.
    Modern,
    /// Let's Go: no EV term, friendship bonus, awakening values added last.
    LetsGo,
}

/// Generation-specific mechanics trait.
///
/// Default implementations reflect Gen 9 (Scarlet/Violet) mechanics.
pub trait GenMechanics: Copy + Clone + Send + Sync + 'static {
    /// Ordered modifier plan consumed by the damage formula.
    fn modifier_plan(&self) -> &'static [ModifierSlot] {
        gen9::PLAN
    }

    /// Critical hit damage multiplier.
    fn crit_multiplier(&self) -> f64 {
        1.5
    }

    /// Spread move multiplier in multi-battles.
    fn multi_target_modifier(&self) -> f64 {
        0.75
    }

    fn stat_formula(&self) -> StatFormula {
        StatFormula::Modern
    }

    /// Whether experience multipliers go through 4096-scale fixed point.
    fn rounds_to_4096(&self) -> bool {
        true
    }
}

/// A rule set tag: a numbered generation or one of the remakes with its own
/// formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Generation {
    Gen1,
    Gen2,
    Gen3,
    Gen4,
    Gen5,
    Gen6,
    Gen7,
    Gen8,
    #[default]
    Gen9,
    /// Let's Go, Pikachu! and Let's Go, Eevee!
    LetsGo,
    /// Brilliant Diamond and Shining Pearl.
    Bdsp,
}

impl Generation {
    /// Every supported tag.
    pub const ALL: [Generation; 11] = [
        Generation::Gen1,
        Generation::Gen2,
        Generation::Gen3,
        Generation::Gen4,
        Generation::Gen5,
        Generation::Gen6,
        Generation::Gen7,
        Generation::Gen8,
        Generation::Gen9,
        Generation::LetsGo,
        Generation::Bdsp,
    ];

    /// Create a Generation from a numeric value.
    pub fn from_num(gen: u8) -> Option<Self> {
        match gen {
            1 => Some(Generation::Gen1),
            2 => Some(Generation::Gen2),
            3 => Some(Generation::Gen3),
            4 => Some(Generation::Gen4),
            5 => Some(Generation::Gen5),
            6 => Some(Generation::Gen6),
            7 => Some(Generation::Gen7),
            8 => Some(Generation::Gen8),
            9 => Some(Generation::Gen9),
            _ => None,
        }
    }

    /// The generation number, or `None` for the remakes.
    ///
    /// Several formulas branch on the numbered generations only and treat
    /// the remakes separately, so this is not the same as `num`.
    pub const fn numbered(self) -> Option<u8> {
        match self {
            Generation::Gen1 => Some(1),
            Generation::Gen2 => Some(2),
            Generation::Gen3 => Some(3),
            Generation::Gen4 => Some(4),
            Generation::Gen5 => Some(5),
            Generation::Gen6 => Some(6),
            Generation::Gen7 => Some(7),
            Generation::Gen8 => Some(8),
            Generation::Gen9 => Some(9),
            Generation::LetsGo | Generation::Bdsp => None,
        }
    }

    /// The mainline generation the title was released in.
    pub const fn num(self) -> u8 {
        match self {
            Generation::LetsGo => 7,
            Generation::Bdsp => 8,
            other => match other.numbered() {
                Some(n) => n,
                None => 9,
            },
        }
    }

    /// Canonical tag, as accepted by `FromStr`.
    pub const fn tag(self) -> &'static str {
        match self {
            Generation::Gen1 => "1",
            Generation::Gen2 => "2",
            Generation::Gen3 => "3",
            Generation::Gen4 => "4",
            Generation::Gen5 => "5",
            Generation::Gen6 => "6",
            Generation::Gen7 => "7",
            Generation::Gen8 => "8",
            Generation::Gen9 => "9",
            Generation::LetsGo => "lgpe",
            Generation::Bdsp => "bdsp",
        }
    }
}

macro_rules! dispatch {
    ($gen:expr, $method:ident) => {
        match $gen {
            Generation::Gen1 | Generation::Gen2 => Gen1.$method(),
            Generation::Gen3 => Gen3.$method(),
            Generation::Gen4 => Gen4.$method(),
            Generation::Gen5 => Gen5.$method(),
            Generation::Gen6 => Gen6.$method(),
            Generation::Gen7 | Generation::Gen8 | Generation::Gen9 => Gen9.$method(),
            Generation::LetsGo => LetsGo.$method(),
            Generation::Bdsp => Bdsp.$method(),
        }
    };
}

// Implement GenMechanics for the tag by delegating
impl GenMechanics for Generation {
    fn modifier_plan(&self) -> &'static [ModifierSlot] {
        dispatch!(self, modifier_plan)
    }

    fn crit_multiplier(&self) -> f64 {
        dispatch!(self, crit_multiplier)
    }

    fn multi_target_modifier(&self) -> f64 {
        dispatch!(self, multi_target_modifier)
    }

    fn stat_formula(&self) -> StatFormula {
        dispatch!(self, stat_formula)
    }

    fn rounds_to_4096(&self) -> bool {
        dispatch!(self, rounds_to_4096)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Generation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "lgpe" => Ok(Generation::LetsGo),
            "bdsp" => Ok(Generation::Bdsp),
            other => other
                .parse::<u8>()
                .ok()
                .and_then(Generation::from_num)
                .ok_or_else(|| CalcError::unsupported("generation", trimmed)),
        }
    }
}

impl Serialize for Generation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.numbered() {
            Some(n) => serializer.serialize_u8(n),
            None => serializer.serialize_str(self.tag()),
        }
    }
}

impl<'de> Deserialize<'de> for Generation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTag {
            Number(u8),
            Text(String),
        }

        match RawTag::deserialize(deserializer)? {
            RawTag::Number(n) => Generation::from_num(n)
                .ok_or_else(|| serde::de::Error::custom(CalcError::unsupported("generation", n.to_string()))),
            RawTag::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("4".parse::<Generation>().unwrap(), Generation::Gen4);
        assert_eq!("LGPE".parse::<Generation>().unwrap(), Generation::LetsGo);
        assert_eq!("bdsp".parse::<Generation>().unwrap(), Generation::Bdsp);
        assert!(matches!(
            "10".parse::<Generation>(),
            Err(CalcError::Unsupported { .. })
        ));

        for gen in Generation::ALL {
            assert_eq!(gen.tag().parse::<Generation>().unwrap(), gen);
        }
    }

    #[test]
    fn test_serde_accepts_numbers_and_tags() {
        let gens: Vec<Generation> = serde_json::from_str(r#"[3, "5", "lgpe"]"#).unwrap();
        assert_eq!(gens, vec![Generation::Gen3, Generation::Gen5, Generation::LetsGo]);

        assert_eq!(serde_json::to_string(&Generation::Gen4).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Generation::Bdsp).unwrap(), "\"bdsp\"");
        assert!(serde_json::from_str::<Generation>("0").is_err());
    }

    #[test]
    fn test_crit_multiplier_by_generation() {
        for gen in Generation::ALL {
            let expected = match gen.numbered() {
                Some(n) if n <= 5 => 2.0,
                _ => 1.5,
            };
            assert_eq!(gen.crit_multiplier(), expected, "{gen}");
        }
    }

    #[test]
    fn test_4096_rounding_generations() {
        let rounding: Vec<Generation> = Generation::ALL
            .into_iter()
            .filter(|g| g.rounds_to_4096())
            .collect();
        assert_eq!(
            rounding,
            vec![
                Generation::Gen5,
                Generation::Gen7,
                Generation::Gen8,
                Generation::Gen9,
                Generation::LetsGo
            ]
        );
    }

    #[test]
    fn test_remakes_report_release_generation() {
        assert_eq!(Generation::LetsGo.num(), 7);
        assert_eq!(Generation::Bdsp.num(), 8);
        assert_eq!(Generation::Bdsp.numbered(), None);
        assert_eq!(Generation::Gen2.num(), 2);
    }
}
