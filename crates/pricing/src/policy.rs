//! Pricing policy: the surcharge rates and flat amounts the calculator applies.
//!
//! Policies are plain data so they can be versioned and shipped as config
//! files. Both TOML and JSON use the same snake_case keys; any key left out
//! keeps its default. Dates are quoted strings (`effective_from = "2026-04-01"`).
//!
//! ```toml
//! version = 3
//! effective_from = "2026-04-01"
//! urgent_rate = 0.3
//!
//! [lamination]
//! matte = 0.5
//! glossy = 0.75
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use printshop_core::{DomainError, DomainResult};

use crate::customization::Lamination;

/// Errors raised while loading a policy file.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read pricing policy {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML pricing policy: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON pricing policy: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub version: u32,
    /// First day the policy applies; `None` means always.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
    /// Colour printing surcharge, as a fraction of the running unit price.
    pub color_rate: f64,
    /// Double-sided surcharge, as a fraction of the unit price after colour.
    pub double_side_rate: f64,
    /// Urgent delivery surcharge, as a fraction of the order subtotal.
    pub urgent_rate: f64,
    /// Flat per-unit amount for each lamination finish.
    pub lamination: BTreeMap<String, f64>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            version: 1,
            effective_from: None,
            color_rate: 0.2,
            double_side_rate: 0.5,
            urgent_rate: 0.25,
            lamination: BTreeMap::from([
                ("matte".to_string(), 0.5),
                ("glossy".to_string(), 0.5),
            ]),
        }
    }
}

static DEFAULT_POLICY: LazyLock<PricingPolicy> = LazyLock::new(PricingPolicy::default);

impl PricingPolicy {
    /// Shared instance of the default policy.
    pub fn standard() -> &'static PricingPolicy {
        &DEFAULT_POLICY
    }

    /// Flat per-unit amount for a lamination choice.
    ///
    /// `Some(0.0)` for no lamination, `None` when the finish is not priced by
    /// this policy.
    pub fn lamination_flat(&self, lamination: &Lamination) -> Option<f64> {
        match lamination {
            Lamination::None => Some(0.0),
            Lamination::Finish(id) => self.lamination.get(id).copied(),
        }
    }

    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from.is_none_or(|from| from <= date)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let rates = [
            ("color_rate", self.color_rate),
            ("double_side_rate", self.double_side_rate),
            ("urgent_rate", self.urgent_rate),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(DomainError::validation(format!(
                    "{name} must be a non-negative number, got {rate}"
                )));
            }
        }

        for (finish, amount) in &self.lamination {
            if finish.is_empty() || finish == Lamination::NONE {
                return Err(DomainError::validation(format!(
                    "lamination finish name {finish:?} is reserved"
                )));
            }
            if !amount.is_finite() || *amount < 0.0 {
                return Err(DomainError::validation(format!(
                    "lamination {finish} must cost a non-negative amount, got {amount}"
                )));
            }
        }

        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, PolicyError> {
        let policy: Self = toml::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_json_str(s: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let policy = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(path = %path.display(), version = policy.version, "pricing policy loaded");
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_storefront_rates() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.color_rate, 0.2);
        assert_eq!(policy.double_side_rate, 0.5);
        assert_eq!(policy.urgent_rate, 0.25);
        assert_eq!(policy.lamination_flat(&Lamination::finish("matte")), Some(0.5));
        assert_eq!(policy.lamination_flat(&Lamination::finish("glossy")), Some(0.5));
        assert_eq!(policy.lamination_flat(&Lamination::None), Some(0.0));
        assert_eq!(policy.lamination_flat(&Lamination::finish("velvet")), None);
        assert_eq!(PricingPolicy::standard(), &policy);
        policy.validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let policy = PricingPolicy::from_toml_str(
            r#"
            version = 2
            effective_from = "2026-04-01"
            urgent_rate = 0.3

            [lamination]
            matte = 0.5
            glossy = 0.75
            soft-touch = 1.25
            "#,
        )
        .unwrap();

        assert_eq!(policy.version, 2);
        assert_eq!(policy.urgent_rate, 0.3);
        assert_eq!(policy.color_rate, 0.2);
        assert_eq!(policy.lamination_flat(&Lamination::finish("soft-touch")), Some(1.25));
        assert_eq!(policy.effective_from, NaiveDate::from_ymd_opt(2026, 4, 1));
    }

    #[test]
    fn json_uses_same_keys() {
        let policy = PricingPolicy::from_json_str(r#"{ "color_rate": 0.15 }"#).unwrap();
        assert_eq!(policy.color_rate, 0.15);
        assert_eq!(policy.double_side_rate, 0.5);
    }

    #[test]
    fn rejects_negative_rates_and_reserved_finish() {
        assert!(matches!(
            PricingPolicy::from_toml_str("color_rate = -0.1"),
            Err(PolicyError::Invalid(DomainError::Validation(_)))
        ));
        assert!(matches!(
            PricingPolicy::from_toml_str("[lamination]\nnone = 1.0"),
            Err(PolicyError::Invalid(DomainError::Validation(_)))
        ));
        assert!(matches!(
            PricingPolicy::from_toml_str("color_rate = \"high\""),
            Err(PolicyError::Toml(_))
        ));
    }

    #[test]
    fn effective_date_gate() {
        let policy = PricingPolicy {
            effective_from: NaiveDate::from_ymd_opt(2026, 4, 1),
            ..PricingPolicy::default()
        };
        assert!(!policy.is_effective_on(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(policy.is_effective_on(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
        assert!(PricingPolicy::default().is_effective_on(NaiveDate::MIN));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = PricingPolicy::load("/nonexistent/pricing.toml").unwrap_err();
        match err {
            PolicyError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/pricing.toml")),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = std::env::temp_dir().join(format!("printshop-policy-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("policy.json");
        std::fs::write(&json_path, r#"{ "version": 7 }"#).unwrap();
        assert_eq!(PricingPolicy::load(&json_path).unwrap().version, 7);

        let toml_path = dir.join("policy.toml");
        std::fs::write(&toml_path, "version = 8").unwrap();
        assert_eq!(PricingPolicy::load(&toml_path).unwrap().version, 8);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
