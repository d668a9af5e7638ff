//! Application configuration: typed structures, loading and validation

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_config, load_from_str};
pub use types::{
    ApiCredentials, AppConfig, AppSettings, ExchangeConfig, MetadataSettings, SolverSettings,
    StrategyConfig,
};
pub use validation::ValidationError;
