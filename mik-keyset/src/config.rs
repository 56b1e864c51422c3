//! Paginator defaults, loaded from code or TOML.
//!
//! ```
//! use mik_keyset::{PaginatorConfig, SortDir};
//!
//! let config = PaginatorConfig::from_toml_str(
//!     r#"
//!     default_limit = 25
//!     default_order = "asc"
//!     max_limit = 100
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.default_limit, 25);
//! assert_eq!(config.default_order, SortDir::Asc);
//! assert_eq!(config.default_key, "ID");
//! ```

use serde::Deserialize;

use crate::builder::SortDir;
use crate::error::ConfigError;
use crate::naming::ColumnNaming;

/// Default page size.
pub const DEFAULT_LIMIT: usize = 10;

/// Default key: the primary identity field.
pub const DEFAULT_KEY: &str = "ID";

/// Explicit pagination defaults, passed to a [`Paginator`](crate::Paginator) at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorConfig {
    /// Key used when no keys are set. Default `"ID"`.
    pub default_key: String,
    /// Page size used when no limit (or `0`) is set. Default `10`.
    pub default_limit: usize,
    /// Direction used when none is set. Default [`SortDir::Desc`].
    pub default_order: SortDir,
    /// Upper bound for caller-supplied limits. Default: unbounded.
    pub max_limit: Option<usize>,
    /// Key to column name mapping. Default [`ColumnNaming::Snake`].
    pub column_naming: ColumnNaming,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            default_key: DEFAULT_KEY.to_string(),
            default_limit: DEFAULT_LIMIT,
            default_order: SortDir::Desc,
            max_limit: None,
            column_naming: ColumnNaming::Snake,
        }
    }
}

impl PaginatorConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_key.is_empty() {
            return Err(ConfigError::Invalid("default_key must not be empty".into()));
        }
        if self.default_limit == 0 {
            return Err(ConfigError::Invalid("default_limit must be positive".into()));
        }
        match self.max_limit {
            Some(0) => Err(ConfigError::Invalid("max_limit must be positive".into())),
            Some(max) if max < self.default_limit => Err(ConfigError::Invalid(format!(
                "max_limit ({max}) is below default_limit ({})",
                self.default_limit
            ))),
            _ => Ok(()),
        }
    }

    /// Set the default key.
    pub fn with_default_key(mut self, key: impl Into<String>) -> Self {
        self.default_key = key.into();
        self
    }

    /// Set the default page size.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the default direction.
    pub fn with_default_order(mut self, order: SortDir) -> Self {
        self.default_order = order;
        self
    }

    /// Set the upper bound for caller-supplied limits.
    pub fn with_max_limit(mut self, max: usize) -> Self {
        self.max_limit = Some(max);
        self
    }

    /// Set the key to column mapping.
    pub fn with_column_naming(mut self, naming: ColumnNaming) -> Self {
        self.column_naming = naming;
        self
    }
}
