//! Built-in scenario packs and TOML config loading.
//!
//! Packs are static parameter tables, no logic: a pack resolves to a
//! `GenerationConfig` that individual CLI flags may then override.

use std::fs;
use std::path::Path;

use grist_core::config::{GenerationConfig, Seed};

pub struct PackInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub vendor_count: usize,
    pub po_count: usize,
}

pub const PACKS: [PackInfo; 3] = [
    PackInfo {
        name: "smoke",
        description: "small clean-ish run for pipeline smoke tests",
        vendor_count: 50,
        po_count: 200,
    },
    PackInfo {
        name: "quarterly-audit",
        description: "mid-size book with audit-typical anomaly rates",
        vendor_count: 200,
        po_count: 2_000,
    },
    PackInfo {
        name: "fraud-heavy",
        description: "elevated fraud-pattern rates for detector stress tests",
        vendor_count: 150,
        po_count: 1_500,
    },
];

fn with_anomalies(mut config: GenerationConfig, rates: &[(&str, f64)]) -> GenerationConfig {
    for (key, pct) in rates {
        config.anomalies.insert(key.to_string(), *pct);
    }
    config
}

/// Resolve a pack name to its parameter table.
pub fn resolve(name: &str) -> Option<GenerationConfig> {
    let base = |info: &PackInfo| GenerationConfig {
        seed: Seed::Text(info.name.to_string()),
        vendor_count: info.vendor_count,
        po_count: info.po_count,
        ..GenerationConfig::default()
    };
    match name {
        "smoke" => Some(with_anomalies(
            base(&PACKS[0]),
            &[("missing_tax_id_pct", 2.0), ("duplicate_invoice_number_pct", 1.0)],
        )),
        "quarterly-audit" => Some(with_anomalies(
            base(&PACKS[1]),
            &[
                ("missing_tax_id_pct", 3.0),
                ("vendor_unapproved_pct", 2.0),
                ("pr_unapproved_pct", 2.0),
                ("invoice_without_grn_pct", 3.0),
                ("delayed_receipt_pct", 4.0),
                ("partial_receipt_pct", 3.0),
                ("payment_before_invoice_pct", 1.0),
            ],
        )),
        "fraud-heavy" => Some(with_anomalies(
            base(&PACKS[2]),
            &[
                ("duplicate_vendor_pan_pct", 5.0),
                ("duplicate_bank_account_pct", 5.0),
                ("unverified_bank_change_pct", 6.0),
                ("inactive_vendor_usage_pct", 4.0),
                ("duplicate_invoice_number_pct", 5.0),
                ("duplicate_pr_pct", 4.0),
                ("po_split_threshold_pct", 6.0),
                ("payment_before_invoice_pct", 4.0),
                ("high_value_payment_pct", 3.0),
            ],
        )),
        _ => None,
    }
}

/// Load a `GenerationConfig` from a TOML file. Unknown keys are ignored;
/// missing keys fall back to defaults.
pub fn load_toml(path: &Path) -> Result<GenerationConfig, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    toml::from_str(&text).map_err(|e| format!("invalid config {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_pack_resolves_and_validates() {
        for info in &PACKS {
            let config = resolve(info.name).unwrap();
            config.validate().unwrap();
            assert_eq!(config.vendor_count, info.vendor_count);
        }
    }

    #[test]
    fn unknown_pack_is_none() {
        assert!(resolve("galactic").is_none());
    }

    #[test]
    fn toml_round_trip_with_partial_keys() {
        let dir = std::env::temp_dir();
        let path = dir.join("grist-scenario-test.toml");
        fs::write(&path, "seed = \"audit-q3\"\nvendor_count = 25\n").unwrap();
        let config = load_toml(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.seed, Seed::Text("audit-q3".to_string()));
        assert_eq!(config.vendor_count, 25);
        assert_eq!(config.po_count, GenerationConfig::default().po_count);
    }
}
