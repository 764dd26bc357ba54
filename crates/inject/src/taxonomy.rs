//! Test-step taxonomy: the fixed catalog of compliance check
//! identifiers that planted anomalies are meant to trigger.
//!
//! Anomaly keys map to one-or-more candidate step ids; the injector
//! picks one id per invocation (a single seeded draw) and applies it to
//! every truth record of that call. A key with no mapping, or a mapped
//! id missing from the catalog, soft-skips the anomaly type.

/// One compliance test step in the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestStep {
    pub id: &'static str,
    pub name: &'static str,
    pub process_area: &'static str,
}

pub const CATALOG: &[TestStep] = &[
    TestStep { id: "VM-01", name: "Vendor missing statutory tax identifiers", process_area: "vendor_master" },
    TestStep { id: "VM-02", name: "Duplicate vendor PAN across master records", process_area: "vendor_master" },
    TestStep { id: "VM-03", name: "Duplicate vendor bank account", process_area: "vendor_master" },
    TestStep { id: "VM-04", name: "Vendor created without approval", process_area: "vendor_master" },
    TestStep { id: "VM-05", name: "Vendor bank change not re-verified", process_area: "vendor_master" },
    TestStep { id: "VM-06", name: "Transactions recorded against inactive vendor", process_area: "vendor_master" },
    TestStep { id: "VM-07", name: "Vendor GST registration missing for invoiced vendor", process_area: "vendor_master" },
    TestStep { id: "PR-01", name: "Requisition above threshold lacking approval", process_area: "purchase_requisition" },
    TestStep { id: "PR-02", name: "Duplicate requisition submitted", process_area: "purchase_requisition" },
    TestStep { id: "PO-01", name: "Order split just under approval threshold", process_area: "purchase_order" },
    TestStep { id: "PO-02", name: "Order value near-miss below sanction limit", process_area: "purchase_order" },
    TestStep { id: "GR-01", name: "Receipt recorded well after delivery window", process_area: "goods_receipt" },
    TestStep { id: "GR-02", name: "Short receipt against ordered quantity", process_area: "goods_receipt" },
    TestStep { id: "IP-01", name: "Duplicate invoice number booked", process_area: "invoice_processing" },
    TestStep { id: "IP-02", name: "Invoice booked without goods receipt", process_area: "invoice_processing" },
    TestStep { id: "IP-03", name: "Invoice above threshold lacking approval", process_area: "invoice_processing" },
    TestStep { id: "PY-01", name: "Payment dated before invoice", process_area: "payments" },
    TestStep { id: "PY-02", name: "High-value payment flagged for review", process_area: "payments" },
];

/// Candidate step ids for an anomaly key, in catalog order.
pub fn steps_for(anomaly_key: &str) -> &'static [&'static str] {
    match anomaly_key {
        "missing_tax_id_pct" => &["VM-01"],
        "duplicate_vendor_pan_pct" => &["VM-02"],
        "duplicate_bank_account_pct" => &["VM-03"],
        "vendor_unapproved_pct" => &["VM-04"],
        "unverified_bank_change_pct" => &["VM-05"],
        "inactive_vendor_usage_pct" => &["VM-06"],
        "vendor_compliance_pct" => &["VM-07"],
        "pr_unapproved_pct" => &["PR-01"],
        "duplicate_pr_pct" => &["PR-02"],
        // Split-threshold near-misses trip either of two order checks.
        "po_split_threshold_pct" => &["PO-01", "PO-02"],
        "delayed_receipt_pct" => &["GR-01"],
        "partial_receipt_pct" => &["GR-02"],
        "duplicate_invoice_number_pct" => &["IP-01"],
        "invoice_without_grn_pct" => &["IP-02"],
        "invoice_unapproved_pct" => &["IP-03"],
        "payment_before_invoice_pct" => &["PY-01"],
        "high_value_payment_pct" => &["PY-02"],
        _ => &[],
    }
}

/// Resolve a step id to its catalog metadata.
pub fn lookup(step_id: &str) -> Option<&'static TestStep> {
    CATALOG.iter().find(|s| s.id == step_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mapped_step_exists_in_catalog() {
        let keys = [
            "missing_tax_id_pct",
            "duplicate_vendor_pan_pct",
            "duplicate_bank_account_pct",
            "vendor_unapproved_pct",
            "unverified_bank_change_pct",
            "inactive_vendor_usage_pct",
            "vendor_compliance_pct",
            "pr_unapproved_pct",
            "duplicate_pr_pct",
            "po_split_threshold_pct",
            "delayed_receipt_pct",
            "partial_receipt_pct",
            "duplicate_invoice_number_pct",
            "invoice_without_grn_pct",
            "invoice_unapproved_pct",
            "payment_before_invoice_pct",
            "high_value_payment_pct",
        ];
        for key in keys {
            let steps = steps_for(key);
            assert!(!steps.is_empty(), "{} has no mapping", key);
            for id in steps {
                assert!(lookup(id).is_some(), "{} maps to unknown step {}", key, id);
            }
        }
    }

    #[test]
    fn unknown_key_maps_to_nothing() {
        assert!(steps_for("made_up_pct").is_empty());
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = CATALOG.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }
}
