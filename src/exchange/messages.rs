//! BitMEX REST message types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entry of the `/instrument` listing
///
/// Only the fields used for metadata resolution are kept; the listing
/// carries many more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub symbol: String,
    #[serde(default)]
    pub tick_size: Option<Decimal>,
    #[serde(default)]
    pub underlying_to_position_multiplier: Option<Decimal>,
    #[serde(default)]
    pub quote_to_settle_multiplier: Option<Decimal>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Listing position and tick size of a trading pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPairIndex {
    pub index: u64,
    pub tick_size: Decimal,
}

/// Settlement multipliers of a trading pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPairMultipliers {
    pub base_multiplier: Decimal,
    pub quote_multiplier: Decimal,
}
