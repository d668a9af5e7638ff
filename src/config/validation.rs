//! Field validators for the strategy configuration
//!
//! Every validator is a pure function of its input and reports failures as
//! a [`ValidationError`] naming the field.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::types::{AppConfig, StrategyConfig};
use crate::exchange::domains::ExchangeDomain;

/// A configuration field failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

type Validation<T = ()> = std::result::Result<T, ValidationError>;

/// Check `value` against optional bounds
pub fn validate_decimal(
    field: &str,
    value: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
    inclusive: bool,
) -> Validation {
    let below = |bound: Decimal| if inclusive { value < bound } else { value <= bound };
    let above = |bound: Decimal| if inclusive { value > bound } else { value >= bound };
    let (open, close) = if inclusive { ('[', ']') } else { ('(', ')') };

    let out_of_range = min.map_or(false, below) || max.map_or(false, above);
    if out_of_range {
        let lo = min.map_or("-inf".to_string(), |m| m.to_string());
        let hi = max.map_or("inf".to_string(), |m| m.to_string());
        return Err(ValidationError::new(
            field,
            format!("{value} is not in {open}{lo}, {hi}{close}"),
        ));
    }
    Ok(())
}

pub fn validate_int(
    field: &str,
    value: i64,
    min: Option<i64>,
    max: Option<i64>,
    inclusive: bool,
) -> Validation {
    validate_decimal(
        field,
        Decimal::from(value),
        min.map(Decimal::from),
        max.map(Decimal::from),
        inclusive,
    )
}

/// Positive, finite float
pub fn validate_positive_float(field: &str, value: f64) -> Validation {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(field, format!("{value} must be a positive number")))
    }
}

pub fn validate_exchange(field: &str, value: &str) -> Validation<ExchangeDomain> {
    ExchangeDomain::from_name(value).ok_or_else(|| {
        let known: Vec<_> = ExchangeDomain::ALL.iter().map(|d| d.name()).collect();
        ValidationError::new(
            field,
            format!("{value} is not a known exchange ({})", known.join(", ")),
        )
    })
}

/// Split `LTC-USDT,ETH-USDT` into trading pairs
pub fn parse_markets(field: &str, value: &str) -> Validation<Vec<(String, String)>> {
    let markets: Vec<_> = value
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|market| match market.split_once('-') {
            Some((base, quote))
                if !base.is_empty() && !quote.is_empty() && !quote.contains('-') =>
            {
                Ok((base.to_uppercase(), quote.to_uppercase()))
            }
            _ => Err(ValidationError::new(
                field,
                format!("{market} is not a BASE-QUOTE trading pair"),
            )),
        })
        .collect::<Validation<_>>()?;

    if markets.is_empty() {
        return Err(ValidationError::new(field, "at least one market is required"));
    }
    Ok(markets)
}

/// The token must be the base or quote of one of the markets
pub fn validate_token(field: &str, value: &str, markets: &[(String, String)]) -> Validation {
    let token = value.trim().to_uppercase();
    let tokens: BTreeSet<&str> = markets
        .iter()
        .flat_map(|(base, quote)| [base.as_str(), quote.as_str()])
        .collect();

    if tokens.contains(token.as_str()) {
        Ok(())
    } else {
        let known: Vec<_> = tokens.into_iter().collect();
        Err(ValidationError::new(
            field,
            format!("Invalid token. {token} is not one of {}", known.join(",")),
        ))
    }
}

/// Parse `BTC:0.1,BNB:1` into token amounts
pub fn parse_reserved_balances(field: &str, value: &str) -> Validation<BTreeMap<String, Decimal>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Validation<(String, Decimal)> {
            let (token, amount) = entry.split_once(':').ok_or_else(|| {
                ValidationError::new(field, format!("{entry} is not TOKEN:amount"))
            })?;
            let amount: Decimal = amount
                .trim()
                .parse()
                .map_err(|e| ValidationError::new(field, format!("{entry}: {e}")))?;
            if amount < Decimal::ZERO {
                return Err(ValidationError::new(field, format!("{entry}: amount is negative")));
            }
            Ok((token.trim().to_uppercase(), amount))
        })
        .collect()
}

impl StrategyConfig {
    /// Validate every field
    pub fn validate(&self) -> Validation {
        let zero = Some(Decimal::ZERO);

        validate_exchange("exchange", &self.exchange)?;
        let markets = parse_markets("markets", &self.markets)?;
        validate_token("token", &self.token, &markets)?;
        validate_decimal("spread", self.spread, zero, Some(Decimal::ONE_HUNDRED), false)?;
        parse_reserved_balances("reserved_balances", &self.reserved_balances)?;
        validate_decimal("market_budget_usd", self.market_budget_usd, zero, None, false)?;
        validate_positive_float("order_refresh_time", self.order_refresh_time)?;
        validate_decimal(
            "order_refresh_tolerance_pct",
            self.order_refresh_tolerance_pct,
            Some(Decimal::from(-10)),
            Some(Decimal::TEN),
            true,
        )?;
        validate_decimal(
            "inventory_range_multiplier",
            self.inventory_range_multiplier,
            zero,
            None,
            false,
        )?;
        validate_int("volatility_interval", self.volatility_interval, Some(1), None, false)?;
        validate_int("avg_volatility_period", self.avg_volatility_period, Some(1), None, false)?;
        validate_decimal(
            "volatility_to_spread_multiplier",
            self.volatility_to_spread_multiplier,
            zero,
            None,
            false,
        )?;
        Ok(())
    }

    /// Parsed market list; only meaningful after `validate` succeeded
    pub fn market_pairs(&self) -> Validation<Vec<(String, String)>> {
        parse_markets("markets", &self.markets)
    }
}

impl AppConfig {
    /// Validate the whole configuration once, at load time
    pub fn validate(&self) -> Validation {
        self.strategy.validate()?;
        validate_decimal("solver.fee", self.solver.fee, Some(Decimal::ZERO), None, true)?;
        if self.solver.fee >= Decimal::ONE {
            return Err(ValidationError::new(
                "solver.fee",
                format!("{} must be below 1", self.solver.fee),
            ));
        }
        if self.metadata.page_size == 0 {
            return Err(ValidationError::new("metadata.page_size", "must be positive"));
        }
        if self.metadata.max_pages == 0 {
            return Err(ValidationError::new("metadata.max_pages", "must be positive"));
        }

        for domain in self.required_exchanges() {
            let complete = self
                .exchange
                .credentials(domain)
                .map_or(false, |c| c.is_complete());
            if !complete {
                let keys: Vec<_> = domain.config_keys().into_iter().map(|k| k.key).collect();
                return Err(ValidationError::new(
                    &format!("exchange.{}", domain.name()),
                    format!("{} are required", keys.join(" and ")),
                ));
            }
        }
        Ok(())
    }

    /// Exchanges whose connect keys must be configured
    pub fn required_exchanges(&self) -> Vec<ExchangeDomain> {
        ExchangeDomain::from_name(&self.strategy.exchange)
            .into_iter()
            .collect()
    }

    /// Configured exchange domain
    pub fn exchange_domain(&self) -> Validation<ExchangeDomain> {
        validate_exchange("strategy.exchange", &self.strategy.exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{
        ApiCredentials, AppSettings, ExchangeConfig, MetadataSettings, SolverSettings,
    };
    use rust_decimal_macros::dec;

    fn strategy() -> StrategyConfig {
        StrategyConfig {
            exchange: "bitmex_testnet".to_string(),
            markets: "ETH-XBT, XBT-USD".to_string(),
            token: "xbt".to_string(),
            spread: dec!(1),
            reserved_balances: "XBT:0.1,ETH:1".to_string(),
            market_budget_usd: dec!(1000),
            order_refresh_time: 10.0,
            order_refresh_tolerance_pct: dec!(0.2),
            inventory_range_multiplier: dec!(1),
            volatility_interval: 300,
            avg_volatility_period: 10,
            volatility_to_spread_multiplier: dec!(1),
        }
    }

    fn app(strategy: StrategyConfig) -> AppConfig {
        AppConfig {
            exchange: ExchangeConfig {
                bitmex: None,
                bitmex_testnet: Some(ApiCredentials::new("key".into(), "secret".into())),
            },
            strategy,
            solver: SolverSettings::default(),
            metadata: MetadataSettings::default(),
            settings: AppSettings::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(app(strategy()).validate(), Ok(()));
    }

    #[test]
    fn test_decimal_bounds() {
        let hundred = Some(dec!(100));
        let zero = Some(dec!(0));
        assert!(validate_decimal("spread", dec!(0), zero, hundred, false).is_err());
        assert!(validate_decimal("spread", dec!(100), zero, hundred, false).is_err());
        assert!(validate_decimal("spread", dec!(99.99), zero, hundred, false).is_ok());
        assert!(validate_decimal("x", dec!(-10), Some(dec!(-10)), Some(dec!(10)), true).is_ok());
        assert!(validate_decimal("x", dec!(10.01), Some(dec!(-10)), Some(dec!(10)), true).is_err());
    }

    #[test]
    fn test_int_bounds() {
        assert!(validate_int("volatility_interval", 1, Some(1), None, false).is_err());
        assert!(validate_int("volatility_interval", 2, Some(1), None, false).is_ok());
    }

    #[test]
    fn test_unknown_exchange() {
        let mut s = strategy();
        s.exchange = "binance".to_string();
        let err = s.validate().unwrap_err();
        assert_eq!(err.field, "exchange");
    }

    #[test]
    fn test_token_must_be_in_markets() {
        let mut s = strategy();
        s.token = "LTC".to_string();
        let err = s.validate().unwrap_err();
        assert_eq!(err.field, "token");
        assert_eq!(err.reason, "Invalid token. LTC is not one of ETH,USD,XBT");
    }

    #[test]
    fn test_bad_markets() {
        assert!(parse_markets("markets", "").is_err());
        assert!(parse_markets("markets", "ETHXBT").is_err());
        assert!(parse_markets("markets", "A-B-C").is_err());
        assert_eq!(
            parse_markets("markets", "ltc-usdt").unwrap(),
            vec![("LTC".to_string(), "USDT".to_string())]
        );
    }

    #[test]
    fn test_reserved_balances() {
        let parsed = parse_reserved_balances("reserved_balances", "btc:0.1, BNB:1").unwrap();
        assert_eq!(parsed.get("BTC"), Some(&dec!(0.1)));
        assert_eq!(parsed.get("BNB"), Some(&dec!(1)));
        assert!(parse_reserved_balances("reserved_balances", "").unwrap().is_empty());
        assert!(parse_reserved_balances("reserved_balances", "BTC").is_err());
        assert!(parse_reserved_balances("reserved_balances", "BTC:-1").is_err());
    }

    #[test]
    fn test_order_refresh_time_positive() {
        let mut s = strategy();
        s.order_refresh_time = 0.0;
        assert_eq!(s.validate().unwrap_err().field, "order_refresh_time");
    }

    #[test]
    fn test_fee_range() {
        let mut config = app(strategy());
        config.solver.fee = dec!(1);
        assert_eq!(config.validate().unwrap_err().field, "solver.fee");
        config.solver.fee = dec!(-0.01);
        assert_eq!(config.validate().unwrap_err().field, "solver.fee");
    }

    #[test]
    fn test_credentials_required_for_configured_exchange() {
        let mut config = app(strategy());
        config.exchange.bitmex_testnet = None;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "exchange.bitmex_testnet");
        assert_eq!(
            err.reason,
            "bitmex_testnet_api_key and bitmex_testnet_api_secret are required"
        );
        assert_eq!(config.required_exchanges(), vec![ExchangeDomain::BitmexTestnet]);
    }
}
