//! C2 — Goods/service split. Only goods purchase orders may carry
//! goods receipts.

use std::collections::BTreeSet;

use serde::Serialize;

use grist_core::records::{Dataset, PoCategory};

#[derive(Debug, Clone, Serialize)]
pub struct C2Result {
    pub service_po_count: usize,
    pub violations: usize,
    pub first_instance: Option<String>,
    pub summary: String,
}

pub fn check_goods_split(dataset: &Dataset) -> C2Result {
    let service_pos: BTreeSet<&str> = dataset
        .purchase_orders
        .iter()
        .filter(|po| po.category == PoCategory::Services)
        .map(|po| po.po_id.as_str())
        .collect();

    let mut violations = 0;
    let mut first_instance = None;
    for grn in &dataset.grns {
        if service_pos.contains(grn.po_id.as_str()) {
            violations += 1;
            if first_instance.is_none() {
                first_instance = Some(format!(
                    "{} is a goods receipt against service order {}",
                    grn.grn_id, grn.po_id
                ));
            }
        }
    }

    let summary = format!(
        "{} of {} goods receipts reference service purchase orders",
        violations,
        dataset.grns.len()
    );
    C2Result {
        service_po_count: service_pos.len(),
        violations,
        first_instance,
        summary,
    }
}
