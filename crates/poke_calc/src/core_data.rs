//! Core value types shared by every calculation module.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Highest individual value a stat can roll.
pub const MAX_IV: u8 = 31;

/// Elemental type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Steel = 8,
    Fire = 9,
    Water = 10,
    Grass = 11,
    Electric = 12,
    Psychic = 13,
    Ice = 14,
    Dragon = 15,
    Dark = 16,
    Fairy = 17,
}

impl Default for Type {
    fn default() -> Self {
        Type::Normal
    }
}

impl Type {
    /// Every type in chart order.
    pub const ALL: [Type; 18] = [
        Type::Normal,
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
        Type::Fairy,
    ];

    /// Lowercase identifier.
    pub const fn name(self) -> &'static str {
        match self {
            Type::Normal => "normal",
            Type::Fighting => "fighting",
            Type::Flying => "flying",
            Type::Poison => "poison",
            Type::Ground => "ground",
            Type::Rock => "rock",
            Type::Bug => "bug",
            Type::Ghost => "ghost",
            Type::Steel => "steel",
            Type::Fire => "fire",
            Type::Water => "water",
            Type::Grass => "grass",
            Type::Electric => "electric",
            Type::Psychic => "psychic",
            Type::Ice => "ice",
            Type::Dragon => "dragon",
            Type::Dark => "dark",
            Type::Fairy => "fairy",
        }
    }

    /// Parse a type from its identifier (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        Type::ALL.into_iter().find(|t| t.name() == lower)
    }

    /// Single-bit set containing this type.
    #[inline]
    pub const fn as_set(self) -> TypeSet {
        TypeSet::from_bits_truncate(1 << self as u32)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of elemental types, one bit per `Type` discriminant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeSet: u32 {
        const NORMAL = 1 << 0;
        const FIGHTING = 1 << 1;
        const FLYING = 1 << 2;
        const POISON = 1 << 3;
        const GROUND = 1 << 4;
        const ROCK = 1 << 5;
        const BUG = 1 << 6;
        const GHOST = 1 << 7;
        const STEEL = 1 << 8;
        const FIRE = 1 << 9;
        const WATER = 1 << 10;
        const GRASS = 1 << 11;
        const ELECTRIC = 1 << 12;
        const PSYCHIC = 1 << 13;
        const ICE = 1 << 14;
        const DRAGON = 1 << 15;
        const DARK = 1 << 16;
        const FAIRY = 1 << 17;
    }
}

impl TypeSet {
    #[inline]
    pub const fn has(self, t: Type) -> bool {
        self.contains(t.as_set())
    }

    /// Members in chart order.
    pub fn types(self) -> Vec<Type> {
        Type::ALL.into_iter().filter(|t| self.has(*t)).collect()
    }
}

impl FromIterator<Type> for TypeSet {
    fn from_iter<I: IntoIterator<Item = Type>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TypeSet::empty(), |acc, t| acc | t.as_set())
    }
}

/// One of the six permanent stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Stat {
    Hp = 0,
    Attack = 1,
    Defense = 2,
    SpAttack = 3,
    SpDefense = 4,
    Speed = 5,
}

impl Stat {
    /// All stats in canonical order.
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpAttack,
        Stat::SpDefense,
        Stat::Speed,
    ];

    /// Stats that a nature can raise or lower (HP excluded).
    pub const BATTLE: [Stat; 5] = [
        Stat::Attack,
        Stat::Defense,
        Stat::SpAttack,
        Stat::SpDefense,
        Stat::Speed,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_hp(self) -> bool {
        matches!(self, Stat::Hp)
    }
}

/// Fixed-size map keyed by `Stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatMap<T>(pub [T; 6]);

impl<T> StatMap<T> {
    pub const fn new(values: [T; 6]) -> Self {
        Self(values)
    }

    /// Build a map by evaluating `f` for every stat.
    pub fn from_fn(f: impl FnMut(Stat) -> T) -> Self {
        Self(Stat::ALL.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, &T)> {
        Stat::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Stat> for StatMap<T> {
    type Output = T;

    fn index(&self, stat: Stat) -> &T {
        &self.0[stat.index()]
    }
}

impl<T> IndexMut<Stat> for StatMap<T> {
    fn index_mut(&mut self, stat: Stat) -> &mut T {
        &mut self.0[stat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_lookup() {
        assert_eq!(Type::from_str("fire"), Some(Type::Fire));
        assert_eq!(Type::from_str("Fire"), Some(Type::Fire));
        assert_eq!(Type::from_str("invalid"), None);
    }

    #[test]
    fn test_type_set_order() {
        let set: TypeSet = [Type::Dark, Type::Fighting, Type::Ghost].into_iter().collect();
        assert_eq!(set.types(), vec![Type::Fighting, Type::Ghost, Type::Dark]);
        assert!(set.has(Type::Ghost));
        assert!(!set.has(Type::Fire));
    }

    #[test]
    fn test_stat_map_indexing() {
        let mut map = StatMap::from_fn(|stat| stat.index() as u16 * 10);
        assert_eq!(map[Stat::Hp], 0);
        assert_eq!(map[Stat::Speed], 50);
        map[Stat::Defense] = 7;
        assert_eq!(map.0[2], 7);
    }
}
