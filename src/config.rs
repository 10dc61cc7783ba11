//! Book configuration and TOML loading.

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Upper bound for `expected_orders`; larger values are almost certainly typos.
pub const MAX_EXPECTED_ORDERS: usize = 1 << 26;

/// What the book does with order kinds it has no matching semantics for
/// (fill-or-kill and good-for-day).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnsupportedKindPolicy {
    /// Refuse the submission with `BookError::UnsupportedOrderType`.
    #[default]
    Reject,
    /// Accept it and treat it exactly like good-till-cancel.
    Inert,
}

/// Configuration for an [`OrderBook`](crate::OrderBook).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookConfig {
    /// Capacity hint for the order arena and id index.
    #[cfg_attr(feature = "serde", serde(default = "default_expected_orders"))]
    pub expected_orders: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unsupported_kinds: UnsupportedKindPolicy,
}

fn default_expected_orders() -> usize {
    1024
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            expected_orders: default_expected_orders(),
            unsupported_kinds: UnsupportedKindPolicy::default(),
        }
    }
}

/// Errors from loading or validating a [`BookConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[cfg(feature = "config")]
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[cfg(feature = "config")]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl BookConfig {
    /// Validate the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expected_orders > MAX_EXPECTED_ORDERS {
            return Err(ConfigError::Invalid(format!(
                "expected_orders must be <= {MAX_EXPECTED_ORDERS}, got {}",
                self.expected_orders
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: BookConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    #[cfg(feature = "config")]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded book config from {}: {config:?}", path.display());
        Ok(config)
    }
}
