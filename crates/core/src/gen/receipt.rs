//! Goods-receipt note synthesis.
//!
//! Candidate POs are filtered by business status first (Approved or
//! Completed), then subset by a per-record Bernoulli draw at `grn_ratio`,
//! iterating in chronological order so GRN sequence numbers increase with
//! date. Partial receipts are allowed; `grn_date >= po_date` always holds
//! here (only the anomaly injector may break it later).

use crate::config::GenerationConfig;
use crate::dates::downstream_date;
use crate::gen::jittered_amount;
use crate::ids::{format_id, SequenceCounter, GRN_PREFIX};
use crate::names;
use crate::records::{DocStatus, Grn, GrnStatus, PurchaseOrder};
use crate::rng::SeedStream;

const FULL_RECEIPT_RATIO: f64 = 0.92;
const QUALITY_PASS_RATIO: f64 = 0.95;
const AMOUNT_VARIANCE_PCT: f64 = 3.0;
const DATE_WINDOW_DAYS: i64 = 20;

fn draw_status(rng: &mut SeedStream) -> GrnStatus {
    let roll = rng.next_f64();
    if roll < 0.85 {
        GrnStatus::Accepted
    } else if roll < 0.95 {
        GrnStatus::Received
    } else {
        GrnStatus::Rejected
    }
}

pub fn generate_grns(
    config: &GenerationConfig,
    orders: &[PurchaseOrder],
    seq: &mut SequenceCounter,
    rng: &mut SeedStream,
) -> Vec<Grn> {
    let mut grns = Vec::new();
    for po in orders {
        if !matches!(po.status, DocStatus::Approved | DocStatus::Completed) {
            continue;
        }
        if !rng.chance(config.grn_ratio) {
            continue;
        }
        let grn_date = downstream_date(rng, po.po_date, DATE_WINDOW_DAYS, 1);
        let grn_id = format_id(GRN_PREFIX, grn_date.year(), seq.next(grn_date.year()));
        let qty_ordered = rng.range_i64(10, 500);
        let qty_received = if rng.chance(FULL_RECEIPT_RATIO) {
            qty_ordered
        } else {
            // Partial receipt: 50-99% of the ordered quantity.
            let floor = (qty_ordered / 2).max(1);
            rng.range_i64(floor, qty_ordered - 1)
        };
        let (amount, _) = jittered_amount(rng, po.order_amount, po.tax_amount, AMOUNT_VARIANCE_PCT);
        let status = draw_status(rng);
        let quality_passed = rng.chance(QUALITY_PASS_RATIO);
        let received_by = names::person_name(rng);

        grns.push(Grn {
            grn_id,
            po_id: po.po_id.clone(),
            vendor_id: po.vendor_id.clone(),
            grn_date,
            qty_ordered,
            qty_received,
            amount,
            status,
            quality_passed,
            received_by,
        });
    }
    grns
}
