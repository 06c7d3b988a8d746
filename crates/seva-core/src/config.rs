//! # Tax Configuration
//!
//! Typed view of the `TaxConfig` settings record.
//!
//! ## Boundary Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Hosted settings store (loosely typed JSON)                             │
//! │    { "is_tax_enabled": "true", "cgst_rate": "9", "igst_rate": 18, … }   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TaxConfig::from_record() ← THIS MODULE                                │
//! │    • numbers or numeric strings accepted                               │
//! │    • missing / malformed rates become 0%                               │
//! │    • non-object record → None (tax engine then charges nothing)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TaxConfig (typed, rates in basis points) ──► compute_tax()            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;
use crate::validation::{validate_region_name, validate_tax_rate, ValidationResult};
use crate::HOME_COUNTRY;

/// How tax applies to buyers outside the seller's home country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InternationalTaxPolicy {
    /// Foreign buyers are treated as inter-state: IGST applies.
    #[default]
    Igst,
    /// Foreign buyers pay no GST.
    Exempt,
}

/// Seller-side GST settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxConfig {
    /// Master switch. When off, no tax is charged at all.
    pub is_tax_enabled: bool,

    /// The seller's registered state (decides intra- vs inter-state).
    pub home_state: String,

    /// The seller's country. Buyers elsewhere are international.
    #[serde(default = "default_home_country")]
    pub home_country: String,

    /// Central GST, charged together with SGST on intra-state sales.
    pub cgst_rate: TaxRate,

    /// State GST, charged together with CGST on intra-state sales.
    pub sgst_rate: TaxRate,

    /// Integrated GST, charged alone on inter-state sales.
    pub igst_rate: TaxRate,

    /// Treatment of buyers outside `home_country`.
    #[serde(default)]
    pub international_policy: InternationalTaxPolicy,
}

fn default_home_country() -> String {
    HOME_COUNTRY.to_string()
}

impl TaxConfig {
    /// Tax switched on for a seller registered in `home_state`, all rates 0%.
    pub fn enabled(home_state: impl Into<String>) -> Self {
        TaxConfig {
            is_tax_enabled: true,
            home_state: home_state.into(),
            home_country: default_home_country(),
            cgst_rate: TaxRate::zero(),
            sgst_rate: TaxRate::zero(),
            igst_rate: TaxRate::zero(),
            international_policy: InternationalTaxPolicy::default(),
        }
    }

    /// Tax switched off.
    pub fn disabled() -> Self {
        TaxConfig {
            is_tax_enabled: false,
            ..TaxConfig::enabled("")
        }
    }

    /// Sets the CGST, SGST and IGST rates.
    pub fn with_rates(mut self, cgst: TaxRate, sgst: TaxRate, igst: TaxRate) -> Self {
        self.cgst_rate = cgst;
        self.sgst_rate = sgst;
        self.igst_rate = igst;
        self
    }

    /// Sets the international buyer policy.
    pub fn with_international_policy(mut self, policy: InternationalTaxPolicy) -> Self {
        self.international_policy = policy;
        self
    }

    /// Builds a typed config from a loosely-typed settings record.
    ///
    /// Returns `None` when the record is not a JSON object (missing or
    /// unreadable settings). Individual malformed fields never fail the
    /// whole record: rates fall back to 0% and the switch to "off".
    ///
    /// ## Example
    /// ```rust
    /// use seva_core::config::TaxConfig;
    /// use serde_json::json;
    ///
    /// let record = json!({
    ///     "is_tax_enabled": true,
    ///     "home_state": "Tamil Nadu",
    ///     "cgst_rate": "9",
    ///     "sgst_rate": 9,
    ///     "igst_rate": "eighteen"
    /// });
    /// let config = TaxConfig::from_record(&record).unwrap();
    /// assert_eq!(config.cgst_rate.bps(), 900);
    /// assert_eq!(config.sgst_rate.bps(), 900);
    /// assert!(config.igst_rate.is_zero());
    /// ```
    pub fn from_record(record: &Value) -> Option<TaxConfig> {
        let fields = record.as_object()?;

        let home_country = fields
            .get("home_country")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(default_home_country);

        let international_policy = match fields.get("international_policy").and_then(Value::as_str) {
            Some(p) if p.trim().eq_ignore_ascii_case("exempt") => InternationalTaxPolicy::Exempt,
            _ => InternationalTaxPolicy::Igst,
        };

        Some(TaxConfig {
            is_tax_enabled: fields.get("is_tax_enabled").map(read_flag).unwrap_or(false),
            home_state: fields
                .get("home_state")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            home_country,
            cgst_rate: fields.get("cgst_rate").map(read_rate).unwrap_or_default(),
            sgst_rate: fields.get("sgst_rate").map(read_rate).unwrap_or_default(),
            igst_rate: fields.get("igst_rate").map(read_rate).unwrap_or_default(),
            international_policy,
        })
    }

    /// Checks the config before it is saved or trusted for checkout.
    ///
    /// ## Rules
    /// - Every rate is between 0% and 100%
    /// - CGST and SGST are both zero or both non-zero
    /// - An enabled config names its home state
    pub fn validate(&self) -> ValidationResult<()> {
        validate_tax_rate("cgst_rate", self.cgst_rate)?;
        validate_tax_rate("sgst_rate", self.sgst_rate)?;
        validate_tax_rate("igst_rate", self.igst_rate)?;
        if self.cgst_rate.is_zero() != self.sgst_rate.is_zero() {
            return Err(ValidationError::InvalidFormat {
                field: "sgst_rate".to_string(),
                reason: "CGST and SGST must both be set or both be zero".to_string(),
            });
        }
        if self.is_tax_enabled {
            validate_region_name("home_state", &self.home_state)?;
        }
        Ok(())
    }
}

fn read_rate(value: &Value) -> TaxRate {
    match value {
        Value::Number(n) => n.as_f64().map(TaxRate::from_percentage).unwrap_or_default(),
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map(TaxRate::from_percentage)
            .unwrap_or_default(),
        _ => TaxRate::zero(),
    }
}

fn read_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on"),
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_record_typed_values() {
        let record = json!({
            "is_tax_enabled": true,
            "home_state": " Tamil Nadu ",
            "cgst_rate": 9,
            "sgst_rate": 9.0,
            "igst_rate": 18
        });
        let config = TaxConfig::from_record(&record).unwrap();

        assert!(config.is_tax_enabled);
        assert_eq!(config.home_state, "Tamil Nadu");
        assert_eq!(config.home_country, "India");
        assert_eq!(config.cgst_rate.bps(), 900);
        assert_eq!(config.sgst_rate.bps(), 900);
        assert_eq!(config.igst_rate.bps(), 1800);
        assert_eq!(config.international_policy, InternationalTaxPolicy::Igst);
    }

    #[test]
    fn test_from_record_malformed_values_become_zero() {
        let record = json!({
            "is_tax_enabled": "yes",
            "home_state": "Kerala",
            "cgst_rate": null,
            "sgst_rate": "n/a",
            "igst_rate": -18,
        });
        let config = TaxConfig::from_record(&record).unwrap();

        assert!(config.is_tax_enabled);
        assert!(config.cgst_rate.is_zero());
        assert!(config.sgst_rate.is_zero());
        assert!(config.igst_rate.is_zero());
    }

    #[test]
    fn test_from_record_percent_strings_and_policy() {
        let record = json!({
            "is_tax_enabled": "true",
            "home_state": "Goa",
            "igst_rate": "18 %",
            "home_country": "india",
            "international_policy": "Exempt"
        });
        let config = TaxConfig::from_record(&record).unwrap();

        assert_eq!(config.igst_rate.bps(), 1800);
        assert_eq!(config.home_country, "india");
        assert_eq!(config.international_policy, InternationalTaxPolicy::Exempt);
    }

    #[test]
    fn test_from_record_missing_switch_is_disabled() {
        let config = TaxConfig::from_record(&json!({ "home_state": "Goa" })).unwrap();
        assert!(!config.is_tax_enabled);
    }

    #[test]
    fn test_from_record_non_object_is_absent() {
        assert!(TaxConfig::from_record(&Value::Null).is_none());
        assert!(TaxConfig::from_record(&json!([1, 2, 3])).is_none());
        assert!(TaxConfig::from_record(&json!("tax")).is_none());
    }

    #[test]
    fn test_validate() {
        let ok = TaxConfig::enabled("Tamil Nadu").with_rates(
            TaxRate::from_bps(900),
            TaxRate::from_bps(900),
            TaxRate::from_bps(1800),
        );
        assert!(ok.validate().is_ok());

        let no_state = TaxConfig::enabled("   ");
        assert!(no_state.validate().is_err());

        let too_high = TaxConfig::disabled().with_rates(
            TaxRate::zero(),
            TaxRate::zero(),
            TaxRate::from_bps(10_001),
        );
        assert!(too_high.validate().is_err());

        // Disabled configs don't need a home state.
        assert!(TaxConfig::disabled().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_paired_split_rates() {
        let cgst_only = TaxConfig::enabled("Tamil Nadu").with_rates(
            TaxRate::from_bps(900),
            TaxRate::zero(),
            TaxRate::from_bps(1800),
        );
        assert!(matches!(
            cgst_only.validate(),
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "sgst_rate"
        ));

        let sgst_only = TaxConfig::enabled("Tamil Nadu").with_rates(
            TaxRate::zero(),
            TaxRate::from_bps(900),
            TaxRate::from_bps(1800),
        );
        assert!(sgst_only.validate().is_err());

        let igst_only = TaxConfig::enabled("Tamil Nadu").with_rates(
            TaxRate::zero(),
            TaxRate::zero(),
            TaxRate::from_bps(1800),
        );
        assert!(igst_only.validate().is_ok());
    }
}
