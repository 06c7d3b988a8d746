//! # Store Configuration
//!
//! Runtime settings read from the environment.
//!
//! ## Environment Variables
//! | Variable             | Default      | Meaning                                   |
//! |----------------------|--------------|-------------------------------------------|
//! | `SEVA_DB_PATH`       | `seva.db`    | SQLite database file                      |
//! | `SEVA_CART_KEY`      | `seva_cart`  | Key of the persisted cart                 |
//! | `SEVA_BUYER_STATE`   | (empty)      | Buyer's state for tax preview             |
//! | `SEVA_BUYER_COUNTRY` | `India`      | Buyer's country for tax preview           |
//! | `SEVA_TAX_CONFIG`    | (unset)      | Tax settings record as JSON               |

use std::path::PathBuf;

use seva_core::{TaxConfig, HOME_COUNTRY};
use tracing::warn;

use crate::error::StoreResult;
use crate::pool::DbConfig;
use crate::repository::DEFAULT_CART_KEY;

/// Settings for the store and the preview binary.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub cart_key: String,
    pub buyer_state: String,
    pub buyer_country: String,
    /// `None` when no tax settings record is configured.
    pub tax_config: Option<TaxConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            database_path: PathBuf::from("seva.db"),
            cart_key: DEFAULT_CART_KEY.to_string(),
            buyer_state: String::new(),
            buyer_country: HOME_COUNTRY.to_string(),
            tax_config: None,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from `SEVA_*` environment variables.
    ///
    /// ## Errors
    /// A tax record that parses but fails [`seva_core::TaxConfig::validate`]
    /// is an error. A record that is
    /// not a JSON object is ignored with a warning.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let mut config = StoreConfig::default();

        if let Some(path) = lookup("SEVA_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = PathBuf::from(path.trim());
        }

        if let Some(key) = lookup("SEVA_CART_KEY").filter(|k| !k.trim().is_empty()) {
            config.cart_key = key.trim().to_string();
        }

        if let Some(state) = lookup("SEVA_BUYER_STATE") {
            config.buyer_state = state.trim().to_string();
        }

        if let Some(country) = lookup("SEVA_BUYER_COUNTRY").filter(|c| !c.trim().is_empty()) {
            config.buyer_country = country.trim().to_string();
        }

        if let Some(raw) = lookup("SEVA_TAX_CONFIG") {
            config.tax_config = parse_tax_record(&raw)?;
        }

        Ok(config)
    }

    /// Database configuration for `database_path`.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
    }
}

fn parse_tax_record(raw: &str) -> StoreResult<Option<TaxConfig>> {
    let record: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "SEVA_TAX_CONFIG is not valid JSON, tax disabled");
            return Ok(None);
        }
    };

    let Some(tax_config) = TaxConfig::from_record(&record) else {
        warn!("SEVA_TAX_CONFIG is not a JSON object, tax disabled");
        return Ok(None);
    };

    tax_config.validate()?;
    Ok(Some(tax_config))
}
