//! Exchange domain declarations: endpoints, credential keys, default fees

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Supported BitMEX deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeDomain {
    Bitmex,
    BitmexTestnet,
}

/// A configuration key an exchange needs from the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKey {
    pub key: String,
    pub prompt: String,
    /// Only required when this domain is the configured exchange
    pub required_for: ExchangeDomain,
    /// Value must be masked in logs and prompts
    pub is_secure: bool,
    /// Value is used to open the exchange connection
    pub is_connect_key: bool,
}

/// Maker/taker fee pair in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultFees {
    pub maker_percent: Decimal,
    pub taker_percent: Decimal,
}

impl ExchangeDomain {
    pub const ALL: [ExchangeDomain; 2] = [ExchangeDomain::Bitmex, ExchangeDomain::BitmexTestnet];

    pub fn name(&self) -> &'static str {
        match self {
            ExchangeDomain::Bitmex => "bitmex",
            ExchangeDomain::BitmexTestnet => "bitmex_testnet",
        }
    }

    /// Look up a domain by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// REST API root for this deployment
    pub fn rest_url(&self) -> &'static str {
        match self {
            ExchangeDomain::Bitmex => "https://www.bitmex.com/api/v1",
            ExchangeDomain::BitmexTestnet => "https://testnet.bitmex.com/api/v1",
        }
    }

    pub fn example_pair(&self) -> &'static str {
        "ETH-XBT"
    }

    pub fn is_centralized(&self) -> bool {
        true
    }

    pub fn default_fees(&self) -> DefaultFees {
        match self {
            ExchangeDomain::Bitmex => DefaultFees {
                maker_percent: dec!(0.01),
                taker_percent: dec!(0.05),
            },
            ExchangeDomain::BitmexTestnet => DefaultFees {
                maker_percent: dec!(0.02),
                taker_percent: dec!(0.04),
            },
        }
    }

    /// Credential keys for this domain
    pub fn config_keys(&self) -> Vec<ConfigKey> {
        let (label, prefix) = match self {
            ExchangeDomain::Bitmex => ("Bitmex", self.name()),
            ExchangeDomain::BitmexTestnet => ("Bitmex testnet", self.name()),
        };
        [("api_key", "API key"), ("api_secret", "API secret")]
            .into_iter()
            .map(|(suffix, what)| ConfigKey {
                key: format!("{prefix}_{suffix}"),
                prompt: format!("Enter your {label} {what} >>> "),
                required_for: *self,
                is_secure: true,
                is_connect_key: true,
            })
            .collect()
    }
}

impl std::fmt::Display for ExchangeDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ExchangeDomain::from_name("bitmex"), Some(ExchangeDomain::Bitmex));
        assert_eq!(
            ExchangeDomain::from_name("bitmex_testnet"),
            Some(ExchangeDomain::BitmexTestnet)
        );
        assert_eq!(ExchangeDomain::from_name("binance"), None);
    }

    #[test]
    fn test_testnet_keys() {
        let keys = ExchangeDomain::BitmexTestnet.config_keys();
        let names: Vec<_> = keys.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(names, ["bitmex_testnet_api_key", "bitmex_testnet_api_secret"]);
        assert!(keys.iter().all(|k| k.is_secure && k.is_connect_key));
        assert_eq!(keys[1].prompt, "Enter your Bitmex testnet API secret >>> ");
    }

    #[test]
    fn test_default_fees() {
        let fees = ExchangeDomain::Bitmex.default_fees();
        assert_eq!(fees.maker_percent, dec!(0.01));
        assert_eq!(fees.taker_percent, dec!(0.05));
        assert_eq!(ExchangeDomain::BitmexTestnet.default_fees().taker_percent, dec!(0.04));
    }
}
