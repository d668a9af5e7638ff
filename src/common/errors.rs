//! Error types for the application

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::validation::ValidationError;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Result type alias for constraint generation
pub type ConstraintResult<T> = std::result::Result<T, ConstraintError>;

/// Errors raised while building a constraint bundle
///
/// All variants are raised before any output is produced. None of them are
/// retryable with the same input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// Direction is not one of the eight buy/sell combinations
    #[error("Invalid direction: {0:?} (expected three of B/S, e.g. BSB)")]
    InvalidDirection(String),

    /// A leg has no price levels
    #[error("Order book for leg {leg} is empty")]
    EmptyBook { leg: usize },

    /// A level carries a non-positive price or a negative amount
    #[error("Invalid price level {index} on leg {leg}")]
    InvalidPriceLevel { leg: usize, index: usize },

    /// Fee/tolerance outside [0, 1)
    #[error("Invalid fee: {0} (must be in [0, 1))")]
    InvalidFee(Decimal),

    /// Vector or matrix length invariant violated
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Evaluating an allocation exceeded the decimal range
    #[error("Arithmetic overflow evaluating allocation")]
    Overflow,
}

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// URL construction errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Instrument listing exhausted without a match
    #[error("Instrument not found: {0}")]
    InstrumentNotFound(String),

    /// Paginated lookup hit its page budget before the listing ended
    #[error("Page budget exhausted looking up {symbol} after {pages} pages")]
    PageBudgetExhausted { symbol: String, pages: u32 },

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A configuration field failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Constraint generation errors
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
