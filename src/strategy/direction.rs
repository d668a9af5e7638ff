//! Buy/sell combinations across the three legs of a triangle

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::common::errors::ConstraintError;
use crate::common::types::Side;

use Side::{Buy, Sell};

/// Per-leg action for a triangle, e.g. `BSB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction([Side; 3]);

impl Direction {
    pub const BBB: Direction = Direction([Buy, Buy, Buy]);
    pub const BBS: Direction = Direction([Buy, Buy, Sell]);
    pub const BSB: Direction = Direction([Buy, Sell, Buy]);
    pub const BSS: Direction = Direction([Buy, Sell, Sell]);
    pub const SBB: Direction = Direction([Sell, Buy, Buy]);
    pub const SBS: Direction = Direction([Sell, Buy, Sell]);
    pub const SSB: Direction = Direction([Sell, Sell, Buy]);
    pub const SSS: Direction = Direction([Sell, Sell, Sell]);

    /// Every supported combination
    pub const ALL: [Direction; 8] = [
        Self::BBB,
        Self::BBS,
        Self::BSB,
        Self::BSS,
        Self::SBB,
        Self::SBS,
        Self::SSB,
        Self::SSS,
    ];

    pub fn new(first: Side, second: Side, third: Side) -> Self {
        Self([first, second, third])
    }

    /// Side for leg `0..3`
    pub fn leg(&self, index: usize) -> Side {
        self.0[index]
    }

    pub fn sides(&self) -> [Side; 3] {
        self.0
    }

    /// The exact reverse of this trade (every letter flipped)
    pub fn opposite(&self) -> Self {
        Self(self.0.map(Side::opposite))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for side in self.0 {
            write!(f, "{}", side.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Direction {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConstraintError::InvalidDirection(s.to_string());
        let mut chars = s.trim().chars();
        let mut sides = [Buy; 3];
        for side in sides.iter_mut() {
            *side = chars.next().and_then(Side::from_letter).ok_or_else(invalid)?;
        }
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(sides))
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
