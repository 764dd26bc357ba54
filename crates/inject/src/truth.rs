//! Ground-truth records: one per planted mutation, never retracted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::taxonomy::TestStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyTruthRecord {
    /// Sequential within one injection run: ANM-00001, ANM-00002, ...
    pub anomaly_id: String,
    pub test_step_id: String,
    pub test_step_name: String,
    pub process_area: String,
    pub anomaly_key: String,
    pub entity_type: String,
    pub entity_id: String,
    /// Related document ids keyed by role, e.g. {"po_id": "PO-2023-00004"}.
    pub secondary_ids: BTreeMap<String, String>,
    pub planted_fields: Vec<String>,
    pub summary: String,
    pub expected_flag: bool,
    pub notes: Option<String>,
}

/// Truth-record factory owned by a single `inject()` invocation. The id
/// counter lives here, never in process-global state, so concurrent runs
/// in one process cannot cross-contaminate.
pub struct TruthLog {
    records: Vec<AnomalyTruthRecord>,
    next_id: u64,
}

impl TruthLog {
    pub fn new() -> Self {
        TruthLog {
            records: Vec::new(),
            next_id: 1,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        step: &TestStep,
        anomaly_key: &str,
        entity_type: &str,
        entity_id: &str,
        secondary_ids: BTreeMap<String, String>,
        planted_fields: &[&str],
        summary: String,
    ) {
        let anomaly_id = format!("ANM-{:05}", self.next_id);
        self.next_id += 1;
        self.records.push(AnomalyTruthRecord {
            anomaly_id,
            test_step_id: step.id.to_string(),
            test_step_name: step.name.to_string(),
            process_area: step.process_area.to_string(),
            anomaly_key: anomaly_key.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            secondary_ids,
            planted_fields: planted_fields.iter().map(|f| f.to_string()).collect(),
            summary,
            expected_flag: true,
            notes: None,
        });
    }

    pub fn into_records(self) -> Vec<AnomalyTruthRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for TruthLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy;

    #[test]
    fn ids_are_sequential_per_invocation() {
        let step = taxonomy::lookup("VM-01").unwrap();
        let mut log = TruthLog::new();
        log.record(step, "missing_tax_id_pct", "vendor", "VEN-2021-00001", BTreeMap::new(), &["pan"], "x".into());
        log.record(step, "missing_tax_id_pct", "vendor", "VEN-2021-00002", BTreeMap::new(), &["pan"], "y".into());
        let records = log.into_records();
        assert_eq!(records[0].anomaly_id, "ANM-00001");
        assert_eq!(records[1].anomaly_id, "ANM-00002");
        assert!(records.iter().all(|r| r.expected_flag));

        // A fresh invocation restarts its counter.
        let mut log2 = TruthLog::new();
        log2.record(step, "missing_tax_id_pct", "vendor", "VEN-2021-00003", BTreeMap::new(), &["pan"], "z".into());
        assert_eq!(log2.into_records()[0].anomaly_id, "ANM-00001");
    }
}
