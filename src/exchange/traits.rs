//! Trait definitions for instrument metadata sources

use async_trait::async_trait;

use super::messages::Instrument;
use crate::common::errors::Result;

/// Source of an exchange's instrument listing
///
/// Implemented by the REST client; tests substitute an in-memory listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstrumentSource: Send + Sync {
    /// Fetch one page of the listing
    ///
    /// # Arguments
    /// * `start` - Zero-based offset of the first instrument
    /// * `count` - Maximum number of instruments to return
    async fn list_instruments(&self, start: u64, count: u32) -> Result<Vec<Instrument>>;

    /// Fetch the instruments matching `symbol` (normally zero or one)
    async fn get_instrument(&self, symbol: &str) -> Result<Vec<Instrument>>;
}
