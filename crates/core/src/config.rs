//! Run configuration: sizes, date window, linkage ratios, constraint
//! knobs, anomaly percentages, and the advisory policy table.
//!
//! `policy` is descriptive metadata only: it is echoed into the run
//! manifest verbatim and never constrains generation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// The run seed: an integer or a non-empty string. Integer seeds are
/// stringified before hashing, so `42` and `"42"` are the same stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Int(i64),
    Text(String),
}

impl Seed {
    pub fn to_seed_text(&self) -> String {
        match self {
            Seed::Int(n) => n.to_string(),
            Seed::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: Seed,
    pub vendor_count: usize,
    pub po_count: usize,
    pub start_year: i32,
    pub end_year: i32,
    /// Fraction of eligible POs that receive a goods-receipt note.
    pub grn_ratio: f64,
    /// Fraction of POs that receive an invoice.
    pub invoice_ratio: f64,
    /// Fraction of invoices that receive a payment.
    pub payment_ratio: f64,
    /// Transactional generation batch size (memory pagination only).
    pub chunk_size: usize,
    /// Default vendor credit terms, used to fill missing due dates.
    pub credit_days: i64,
    /// Earliest-created fraction of vendors forming the "top" cohort.
    pub top_vendor_fraction: f64,
    /// Target share of POs assigned to the top cohort.
    pub top_vendor_share: f64,
    /// Fraction of POs (top by total amount) classified as goods.
    pub goods_ratio: f64,
    /// Approval threshold used by process-layer anomaly checks.
    pub approval_threshold: Decimal,
    /// Anomaly key -> percentage (0-100). Absent key = never invoked.
    pub anomalies: BTreeMap<String, f64>,
    /// Advisory policy thresholds, echoed to the manifest, not enforced.
    pub policy: BTreeMap<String, serde_json::Value>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            seed: Seed::Int(1),
            vendor_count: 100,
            po_count: 500,
            start_year: 2023,
            end_year: 2024,
            grn_ratio: 0.8,
            invoice_ratio: 0.9,
            payment_ratio: 0.85,
            chunk_size: 1000,
            credit_days: 30,
            top_vendor_fraction: 0.2,
            top_vendor_share: 0.4,
            goods_ratio: 0.6,
            approval_threshold: Decimal::new(100_000, 0),
            anomalies: BTreeMap::new(),
            policy: BTreeMap::new(),
        }
    }
}

impl GenerationConfig {
    /// Percentage configured for an anomaly key, if any.
    pub fn anomaly_pct(&self, key: &str) -> Option<f64> {
        self.anomalies.get(key).copied()
    }

    /// Field-level validation. Runs before any generation work, since a
    /// run is expensive and has file-write side effects downstream.
    pub fn validate(&self) -> Result<(), GenError> {
        if let Seed::Text(s) = &self.seed {
            if s.is_empty() {
                return Err(GenError::invalid_config("seed", "string seed must be non-empty"));
            }
        }
        if self.vendor_count == 0 {
            return Err(GenError::invalid_config("vendor_count", "must be positive"));
        }
        if self.po_count == 0 {
            return Err(GenError::invalid_config("po_count", "must be positive"));
        }
        if !(1970..=9000).contains(&self.start_year) {
            return Err(GenError::invalid_config("start_year", "must be within 1970..=9000"));
        }
        if self.end_year < self.start_year {
            return Err(GenError::invalid_config(
                "end_year",
                format!("end_year {} precedes start_year {}", self.end_year, self.start_year),
            ));
        }
        if self.chunk_size == 0 {
            return Err(GenError::invalid_config("chunk_size", "must be positive"));
        }
        if self.credit_days < 0 {
            return Err(GenError::invalid_config("credit_days", "must be non-negative"));
        }
        for (field, value) in [
            ("grn_ratio", self.grn_ratio),
            ("invoice_ratio", self.invoice_ratio),
            ("payment_ratio", self.payment_ratio),
            ("top_vendor_fraction", self.top_vendor_fraction),
            ("top_vendor_share", self.top_vendor_share),
            ("goods_ratio", self.goods_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenError::invalid_config(
                    field,
                    format!("{} is outside [0, 1]", value),
                ));
            }
        }
        for (key, pct) in &self.anomalies {
            if !(0.0..=100.0).contains(pct) {
                return Err(GenError::invalid_config(
                    "anomalies",
                    format!("{}: {} is outside [0, 100]", key, pct),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_year_window_is_rejected() {
        let cfg = GenerationConfig {
            start_year: 2024,
            end_year: 2023,
            ..GenerationConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig { ref field, .. } if field == "end_year"));
    }

    #[test]
    fn zero_counts_are_rejected() {
        let cfg = GenerationConfig {
            vendor_count: 0,
            ..GenerationConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = GenerationConfig {
            po_count: 0,
            ..GenerationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_string_seed_is_rejected() {
        let cfg = GenerationConfig {
            seed: Seed::Text(String::new()),
            ..GenerationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn out_of_range_anomaly_pct_is_rejected() {
        let mut cfg = GenerationConfig::default();
        cfg.anomalies.insert("missing_tax_id_pct".to_string(), 120.0);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig { ref field, .. } if field == "anomalies"));
    }

    #[test]
    fn seed_deserializes_from_int_or_string() {
        let a: Seed = serde_json::from_str("42").unwrap();
        let b: Seed = serde_json::from_str("\"audit-2024\"").unwrap();
        assert_eq!(a.to_seed_text(), "42");
        assert_eq!(b.to_seed_text(), "audit-2024");
    }
}
