//! Trading-pair metadata resolution over a paginated instrument listing

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::cache::MetadataCache;
use super::messages::{Instrument, TradingPairIndex, TradingPairMultipliers};
use super::traits::InstrumentSource;
use crate::common::errors::{ClientError, Result};
use crate::config::types::MetadataSettings;

/// Resolves listing index, tick size and settlement multipliers per symbol
///
/// Lookups are bounded by `max_pages` and by a wall-clock budget, and the
/// results are stored in an injected [`MetadataCache`].
pub struct MetadataProvider<S> {
    source: S,
    cache: Arc<MetadataCache>,
    settings: MetadataSettings,
}

impl<S: InstrumentSource> MetadataProvider<S> {
    pub fn new(source: S, cache: Arc<MetadataCache>, settings: MetadataSettings) -> Self {
        Self {
            source,
            cache,
            settings,
        }
    }

    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }

    /// Resolve a symbol's position in the listing and its tick size
    ///
    /// # Errors
    /// * `InstrumentNotFound` - a short page ended the listing without a match
    /// * `PageBudgetExhausted` - `max_pages` full pages fetched without a match
    /// * `Timeout` - the lookup exceeded `lookup_timeout_secs`
    /// * transport and parse errors from the source, unchanged
    pub async fn trading_pair_index(&self, symbol: &str) -> Result<TradingPairIndex> {
        if let Some(hit) = self.cache.index(symbol).await {
            return Ok(hit);
        }

        let found = self.with_budget(symbol, self.scan_listing(symbol)).await?;
        self.cache.put_index(symbol, found).await;
        info!(
            symbol,
            index = found.index,
            tick_size = %found.tick_size,
            "Resolved trading pair index"
        );
        Ok(found)
    }

    /// Resolve a symbol's base and quote settlement multipliers
    pub async fn trading_pair_multipliers(&self, symbol: &str) -> Result<TradingPairMultipliers> {
        if let Some(hit) = self.cache.multipliers(symbol).await {
            return Ok(hit);
        }

        let instruments = self
            .with_budget(symbol, self.source.get_instrument(symbol))
            .await?;
        let instrument = instruments
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InstrumentNotFound(symbol.to_string()))?;

        let found = TradingPairMultipliers {
            base_multiplier: required(
                &instrument,
                instrument.underlying_to_position_multiplier,
                "underlyingToPositionMultiplier",
            )?,
            quote_multiplier: required(
                &instrument,
                instrument.quote_to_settle_multiplier,
                "quoteToSettleMultiplier",
            )?,
        };
        self.cache.put_multipliers(symbol, found).await;
        debug!(symbol, ?found, "Resolved trading pair multipliers");
        Ok(found)
    }

    async fn scan_listing(&self, symbol: &str) -> Result<TradingPairIndex> {
        let page_size = self.settings.page_size.max(1);
        let mut index: u64 = 0;

        for page in 0..self.settings.max_pages {
            let start = u64::from(page) * u64::from(page_size);
            let instruments = self.source.list_instruments(start, page_size).await?;
            debug!(symbol, page, returned = instruments.len(), "Scanned instrument page");

            for instrument in &instruments {
                if instrument.symbol == symbol {
                    let tick_size = required(instrument, instrument.tick_size, "tickSize")?;
                    return Ok(TradingPairIndex { index, tick_size });
                }
                index += 1;
            }

            if instruments.len() < page_size as usize {
                return Err(ClientError::InstrumentNotFound(symbol.to_string()));
            }
        }

        warn!(
            symbol,
            pages = self.settings.max_pages,
            "Instrument listing page budget exhausted"
        );
        Err(ClientError::PageBudgetExhausted {
            symbol: symbol.to_string(),
            pages: self.settings.max_pages,
        })
    }

    async fn with_budget<T>(
        &self,
        symbol: &str,
        lookup: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        let budget = Duration::from_secs(self.settings.lookup_timeout_secs);
        tokio::time::timeout(budget, lookup)
            .await
            .map_err(|_| ClientError::Timeout(format!("metadata lookup for {symbol}")))?
    }
}

fn required<T>(instrument: &Instrument, value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        ClientError::InvalidResponse(format!("Instrument {} has no {}", instrument.symbol, field))
    })
}
