//! Common test utilities and fixtures

#![allow(dead_code)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use triangular_arbitrage::common::types::PriceLevel;

fn levels(raw: &[(Decimal, Decimal)]) -> Vec<PriceLevel> {
    raw.iter().map(|&(price, amount)| PriceLevel::new(price, amount)).collect()
}

/// Leg 1 snapshot: three levels
pub fn first_book() -> Vec<PriceLevel> {
    levels(&[
        (dec!(100.8), dec!(0.1)),
        (dec!(101), dec!(2)),
        (dec!(103), dec!(0.2)),
    ])
}

/// Leg 2 snapshot: three levels
pub fn second_book() -> Vec<PriceLevel> {
    levels(&[
        (dec!(0.58), dec!(42)),
        (dec!(0.6), dec!(0.1)),
        (dec!(1), dec!(100)),
    ])
}

/// Leg 3 snapshot: four levels, so leg widths differ
pub fn third_book() -> Vec<PriceLevel> {
    levels(&[
        (dec!(1001), dec!(0.1)),
        (dec!(1002.77), dec!(0.13)),
        (dec!(1100), dec!(7)),
        (dec!(1202), dec!(0.5)),
    ])
}

/// Total number of levels across the fixture books
pub fn total_levels() -> usize {
    first_book().len() + second_book().len() + third_book().len()
}

/// Fee used throughout the fixture scenarios
pub fn fee() -> Decimal {
    dec!(0.1)
}

/// Sample API responses for testing
pub mod api_responses {
    /// One page of the instrument listing
    pub const INSTRUMENT_PAGE: &str = r#"[
        {"symbol": "XBTUSD", "state": "Open", "tickSize": 0.5,
         "underlyingToPositionMultiplier": null, "quoteToSettleMultiplier": 100000000},
        {"symbol": "ETHUSD", "state": "Open", "tickSize": 0.05,
         "underlyingToPositionMultiplier": null, "quoteToSettleMultiplier": 100000000},
        {"symbol": "ETHXBT", "state": "Open", "tickSize": 0.00001,
         "underlyingToPositionMultiplier": 1000, "quoteToSettleMultiplier": 1}
    ]"#;

    /// Single-instrument lookup for ETHXBT
    pub const ETHXBT: &str = r#"[
        {"symbol": "ETHXBT", "state": "Open", "tickSize": 0.00001,
         "underlyingToPositionMultiplier": 1000, "quoteToSettleMultiplier": 1}
    ]"#;
}
