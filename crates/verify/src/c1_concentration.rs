//! C1 — Vendor concentration.
//!
//! Recomputes the purchase-order share held by the earliest-created
//! top-vendor cohort and compares it against the configured target.

use serde::Serialize;

use grist_core::config::GenerationConfig;
use grist_core::records::Dataset;

/// Measured share may land a hair under the target when quota rounding
/// leaves one PO on the boundary; anything inside this band passes.
const SHARE_TOLERANCE: f64 = 0.02;

#[derive(Debug, Clone, Serialize)]
pub struct C1Result {
    pub top_cohort_size: usize,
    pub top_cohort_po_count: usize,
    pub total_po_count: usize,
    pub actual_share: f64,
    pub target_share: f64,
    pub violations: usize,
    pub summary: String,
}

pub fn check_concentration(dataset: &Dataset, config: &GenerationConfig) -> C1Result {
    // Stable sort: ties on created_date keep dataset order, matching
    // how the generation-side quota derives its cohort.
    let mut by_created: Vec<&grist_core::records::Vendor> = dataset.vendors.iter().collect();
    by_created.sort_by_key(|v| v.created_date);
    let cohort_size =
        ((dataset.vendors.len() as f64 * config.top_vendor_fraction).floor() as usize).max(1);
    let cohort: std::collections::BTreeSet<&str> = by_created
        .iter()
        .take(cohort_size)
        .map(|v| v.vendor_id.as_str())
        .collect();

    let total = dataset.purchase_orders.len();
    let held = dataset
        .purchase_orders
        .iter()
        .filter(|po| cohort.contains(po.vendor_id.as_str()))
        .count();
    let actual_share = if total == 0 {
        0.0
    } else {
        held as f64 / total as f64
    };

    let target_share = config.top_vendor_share;
    let violations = usize::from(total > 0 && actual_share + SHARE_TOLERANCE < target_share);
    let summary = if violations == 0 {
        format!(
            "top cohort of {} vendors holds {}/{} purchase orders",
            cohort_size, held, total
        )
    } else {
        format!(
            "top cohort holds {:.1}% of purchase orders, below the {:.1}% target",
            actual_share * 100.0,
            target_share * 100.0
        )
    };

    C1Result {
        top_cohort_size: cohort_size,
        top_cohort_po_count: held,
        total_po_count: total,
        actual_share,
        target_share,
        violations,
        summary,
    }
}
