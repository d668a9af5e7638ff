//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::exchange::domains::ExchangeDomain;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exchange credentials, keyed by domain name
    #[serde(default)]
    pub exchange: ExchangeConfig,
    /// Strategy parameters
    pub strategy: StrategyConfig,
    /// Constraint solver settings
    #[serde(default)]
    pub solver: SolverSettings,
    /// Instrument metadata lookup settings
    #[serde(default)]
    pub metadata: MetadataSettings,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Credentials for the supported exchange domains
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub bitmex: Option<ApiCredentials>,
    #[serde(default)]
    pub bitmex_testnet: Option<ApiCredentials>,
}

impl ExchangeConfig {
    pub fn credentials(&self, domain: ExchangeDomain) -> Option<&ApiCredentials> {
        match domain {
            ExchangeDomain::Bitmex => self.bitmex.as_ref(),
            ExchangeDomain::BitmexTestnet => self.bitmex_testnet.as_ref(),
        }
    }
}

/// API credentials for authenticated requests
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiCredentials {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self { api_key, api_secret }
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_secret.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .finish()
    }
}

/// Market-making strategy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Exchange name, one of the known domains
    pub exchange: String,
    /// Comma-separated list of markets, e.g. `LTC-USDT,ETH-USDT`
    pub markets: String,
    /// Token the order size is expressed in; must appear in `markets`
    pub token: String,
    /// Distance from mid price in percent, (0, 100)
    pub spread: Decimal,
    /// Tokens kept out of use, e.g. `BTC:0.1,BNB:1`
    #[serde(default)]
    pub reserved_balances: String,
    /// Budget per market in USD
    pub market_budget_usd: Decimal,
    /// Seconds between order refreshes
    #[serde(default = "default_order_refresh_time")]
    pub order_refresh_time: f64,
    /// Price change in percent that triggers a refresh
    #[serde(default = "default_order_refresh_tolerance_pct")]
    pub order_refresh_tolerance_pct: Decimal,
    /// Tolerable inventory range in multiples of total order size
    #[serde(default = "default_multiplier")]
    pub inventory_range_multiplier: Decimal,
    /// Seconds per mid-price sample used for volatility
    #[serde(default = "default_volatility_interval")]
    pub volatility_interval: i64,
    /// Number of intervals averaged for volatility
    #[serde(default = "default_avg_volatility_period")]
    pub avg_volatility_period: i64,
    /// Converts average volatility to spread
    #[serde(default = "default_multiplier")]
    pub volatility_to_spread_multiplier: Decimal,
}

fn default_order_refresh_time() -> f64 {
    10.0
}

fn default_order_refresh_tolerance_pct() -> Decimal {
    dec!(0.2)
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

fn default_volatility_interval() -> i64 {
    60 * 5
}

fn default_avg_volatility_period() -> i64 {
    10
}

/// Constraint solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Fee/tolerance in [0, 1) reserved from every level's depth
    #[serde(default = "default_fee")]
    pub fee: Decimal,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self { fee: default_fee() }
    }
}

fn default_fee() -> Decimal {
    dec!(0.001)
}

/// Instrument metadata lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSettings {
    /// Instruments requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Maximum pages fetched by one lookup
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Wall-clock budget for one lookup in seconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,
    /// Cache lifetime in seconds (0 = never expire)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            lookup_timeout_secs: default_lookup_timeout(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_page_size() -> u32 {
    500
}

fn default_max_pages() -> u32 {
    20
}

fn default_lookup_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> u64 {
    3600
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
