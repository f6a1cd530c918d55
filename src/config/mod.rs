//! Application configuration module
//!
//! This module provides type-safe configuration loading from an optional
//! file and environment variables using the `config` and `dotenvy` crates.
//! Environment variables use the `DDD_SEMANTICS` prefix and `__` between
//! nested keys.
//!
//! # Example
//!
//! ```no_run
//! use ddd_semantics::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod ddd;
mod error;
mod logging;
mod parser;

pub use ddd::DddConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LogFormat, LoggingConfig};
pub use parser::ParserConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "DDD_SEMANTICS";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Expression parser settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// DDD selection
    #[serde(default)]
    pub ddd: DddConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DDD_SEMANTICS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `DDD_SEMANTICS__PARSER__MAX_DEPTH=32` -> `parser.max_depth = 32`
    /// - `DDD_SEMANTICS__DDD__NAME=travel` -> `ddd.name = "travel"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables on top
    ///
    /// The format (TOML, YAML, JSON, ...) follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a zero parser depth, an unknown log
    /// level or an empty DDD name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.parser.validate()?;
        self.logging.validate()?;
        self.ddd.validate()?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}
