//! Exchange module - BitMEX declarations and instrument metadata

pub mod cache;
pub mod domains;
pub mod messages;
pub mod metadata;
pub mod rest;
pub mod traits;

pub use cache::MetadataCache;
pub use domains::{ConfigKey, DefaultFees, ExchangeDomain};
pub use messages::{Instrument, TradingPairIndex, TradingPairMultipliers};
pub use metadata::MetadataProvider;
pub use rest::BitmexRestClient;
pub use traits::InstrumentSource;
