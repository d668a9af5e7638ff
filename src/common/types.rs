//! Market data types shared across the crate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The other side of the trade
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Single-letter code used in direction strings
    pub fn letter(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    /// Parse a single direction letter (case-insensitive)
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'B' => Some(Side::Buy),
            'S' => Some(Side::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A single price level in an order book snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price at this level, in quote currency per unit of base
    pub price: Decimal,
    /// Base amount available at this price
    pub amount: Decimal,
}

impl PriceLevel {
    /// Create a new price level
    pub fn new(price: Decimal, amount: Decimal) -> Self {
        Self { price, amount }
    }

    /// Quote value of the full level
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

/// Snapshots for the three legs of a triangle, best price first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleBooks {
    pub first: Vec<PriceLevel>,
    pub second: Vec<PriceLevel>,
    pub third: Vec<PriceLevel>,
}

impl TriangleBooks {
    /// Total number of levels across the three legs
    pub fn level_count(&self) -> usize {
        self.first.len() + self.second.len() + self.third.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_letters() {
        assert_eq!(Side::from_letter('b'), Some(Side::Buy));
        assert_eq!(Side::from_letter('S'), Some(Side::Sell));
        assert_eq!(Side::from_letter('x'), None);
        assert_eq!(Side::Buy.letter(), 'B');
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_price_level_notional() {
        let level = PriceLevel::new(dec!(101), dec!(2));
        assert_eq!(level.notional(), dec!(202));
    }

    #[test]
    fn test_triangle_books_deserialize() {
        let json = r#"{
            "first": [{"price": "100.8", "amount": "0.1"}],
            "second": [{"price": "0.58", "amount": "42"}, {"price": "0.6", "amount": "0.1"}],
            "third": [{"price": "1001", "amount": "0.1"}]
        }"#;
        let books: TriangleBooks = serde_json::from_str(json).unwrap();
        assert_eq!(books.level_count(), 4);
        assert_eq!(books.second[1], PriceLevel::new(dec!(0.6), dec!(0.1)));
    }
}
