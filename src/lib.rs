//! TriangularArbitrage Library
//!
//! Builds the linear-program inputs used to size a triangular arbitrage
//! across three linked order books, and resolves the exchange metadata
//! needed to normalize quantities.

pub mod common;
pub mod config;
pub mod exchange;
pub mod strategy;

// Re-export commonly used types
pub use common::errors::{ClientError, ConstraintError, ConstraintResult, Result};
pub use common::types::{PriceLevel, Side, TriangleBooks};
pub use config::types::AppConfig;
pub use exchange::{BitmexRestClient, ExchangeDomain, MetadataCache, MetadataProvider};

// Strategy types
pub use strategy::{
    Allocation, BoxedOptimizer, Bound, ConstraintBundle, ConstraintSolver, Direction, Optimizer,
};
