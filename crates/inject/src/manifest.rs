//! Run manifest: pure aggregation over the final dataset and truth
//! records, plus the advisory policy table echoed verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use grist_core::config::GenerationConfig;
use grist_core::records::Dataset;

use crate::truth::AnomalyTruthRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub seed: String,
    /// Row counts per output file, in file order.
    pub row_counts: BTreeMap<String, usize>,
    pub truth_record_total: usize,
    /// Truth records grouped by taxonomy test-step id.
    pub exceptions_by_step: BTreeMap<String, usize>,
    /// Policy thresholds as configured; advisory only, never enforced.
    pub policy: BTreeMap<String, Value>,
    pub etag: String,
}

/// Compute a SHA-256 etag from compact JSON of the count tables.
fn compute_etag(row_counts: &BTreeMap<String, usize>, by_step: &BTreeMap<String, usize>) -> String {
    let canonical = serde_json::json!({
        "exceptions_by_step": by_step,
        "row_counts": row_counts,
    });
    let text = canonical.to_string();
    let hash = Sha256::digest(text.as_bytes());
    format!("{:x}", hash)
}

pub fn build(
    dataset: &Dataset,
    truth_records: &[AnomalyTruthRecord],
    config: &GenerationConfig,
) -> RunManifest {
    let row_counts: BTreeMap<String, usize> = dataset
        .row_counts()
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    let mut exceptions_by_step: BTreeMap<String, usize> = BTreeMap::new();
    for record in truth_records {
        *exceptions_by_step.entry(record.test_step_id.clone()).or_insert(0) += 1;
    }
    let etag = compute_etag(&row_counts, &exceptions_by_step);
    RunManifest {
        seed: config.seed.to_seed_text(),
        row_counts,
        truth_record_total: truth_records.len(),
        exceptions_by_step,
        policy: config.policy.clone(),
        etag,
    }
}
