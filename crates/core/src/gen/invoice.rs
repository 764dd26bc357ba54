//! Invoice synthesis.
//!
//! Invoices derive from the same chunk's POs (and that chunk's GRNs,
//! looked up by po_id); `invoice_date >= max(po_date, grn_date)` always
//! holds at generation time. Due dates are filled for most invoices from
//! the vendor's credit terms; the rest are left for the normalization
//! pass to default.

use std::collections::BTreeMap;

use crate::config::GenerationConfig;
use crate::dates::{add_days, downstream_date};
use crate::gen::jittered_amount;
use crate::ids::{format_id, SequenceCounter, INVOICE_PREFIX};
use crate::names;
use crate::records::{round2, DocStatus, Grn, Invoice, PurchaseOrder, Vendor};
use crate::rng::SeedStream;

const APPROVED_RATIO: f64 = 0.85;
const DUE_DATE_PRESENT_RATIO: f64 = 0.70;
const AMOUNT_VARIANCE_PCT: f64 = 4.0;
const DATE_WINDOW_DAYS: i64 = 20;

fn draw_status(rng: &mut SeedStream) -> DocStatus {
    let roll = rng.next_f64();
    if roll < 0.80 {
        DocStatus::Approved
    } else if roll < 0.95 {
        DocStatus::Submitted
    } else {
        DocStatus::Draft
    }
}

pub fn generate_invoices(
    config: &GenerationConfig,
    orders: &[PurchaseOrder],
    grns: &[Grn],
    vendors: &[Vendor],
    seq: &mut SequenceCounter,
    rng: &mut SeedStream,
) -> Vec<Invoice> {
    let grn_by_po: BTreeMap<&str, &Grn> =
        grns.iter().map(|g| (g.po_id.as_str(), g)).collect();
    let terms_by_vendor: BTreeMap<&str, i64> = vendors
        .iter()
        .map(|v| (v.vendor_id.as_str(), v.payment_terms_days))
        .collect();

    let mut invoices = Vec::new();
    for po in orders {
        if !matches!(po.status, DocStatus::Approved | DocStatus::Completed) {
            continue;
        }
        if !rng.chance(config.invoice_ratio) {
            continue;
        }
        let grn = grn_by_po.get(po.po_id.as_str()).copied();
        let anchor = match grn {
            Some(g) if g.grn_date > po.po_date => g.grn_date,
            _ => po.po_date,
        };
        let invoice_date = downstream_date(rng, anchor, DATE_WINDOW_DAYS, 0);
        let invoice_number =
            format_id(INVOICE_PREFIX, invoice_date.year(), seq.next(invoice_date.year()));
        let (invoice_amount, tax_amount) =
            jittered_amount(rng, po.order_amount, po.tax_amount, AMOUNT_VARIANCE_PCT);
        let total_amount = round2(invoice_amount + tax_amount);
        let status = draw_status(rng);
        let (approved_by, approved_date) = if rng.chance(APPROVED_RATIO) {
            (
                Some(names::person_name(rng)),
                Some(add_days(invoice_date, rng.range_i64(0, 7))),
            )
        } else {
            (None, None)
        };
        let due_date = if rng.chance(DUE_DATE_PRESENT_RATIO) {
            let terms = terms_by_vendor
                .get(po.vendor_id.as_str())
                .copied()
                .unwrap_or(config.credit_days);
            Some(add_days(invoice_date, terms))
        } else {
            None
        };

        invoices.push(Invoice {
            invoice_number,
            vendor_id: po.vendor_id.clone(),
            po_id: Some(po.po_id.clone()),
            grn_id: grn.map(|g| g.grn_id.clone()),
            invoice_date,
            due_date,
            invoice_amount,
            tax_amount,
            total_amount,
            status,
            approved_by,
            approved_date,
        });
    }
    invoices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;
    use crate::gen::order::generate_purchase_orders;
    use crate::gen::receipt::generate_grns;
    use crate::gen::vendor::generate_vendors;

    fn fixture() -> (GenerationConfig, Vec<Vendor>, Vec<PurchaseOrder>, Vec<Grn>, SeedStream) {
        let cfg = GenerationConfig {
            seed: Seed::Int(13),
            vendor_count: 40,
            ..GenerationConfig::default()
        };
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let vendors = generate_vendors(&cfg, &mut rng);
        let mut po_seq = SequenceCounter::new();
        let orders = generate_purchase_orders(&cfg, &vendors, 250, &mut po_seq, &mut rng).unwrap();
        let mut grn_seq = SequenceCounter::new();
        let grns = generate_grns(&cfg, &orders, &mut grn_seq, &mut rng);
        (cfg, vendors, orders, grns, rng)
    }

    #[test]
    fn invoice_dates_follow_po_and_grn() {
        let (cfg, vendors, orders, grns, mut rng) = fixture();
        let mut seq = SequenceCounter::new();
        let invoices = generate_invoices(&cfg, &orders, &grns, &vendors, &mut seq, &mut rng);
        assert!(!invoices.is_empty());
        for inv in &invoices {
            let po = orders
                .iter()
                .find(|o| Some(&o.po_id) == inv.po_id.as_ref())
                .unwrap();
            assert!(inv.invoice_date >= po.po_date);
            if let Some(grn_id) = &inv.grn_id {
                let grn = grns.iter().find(|g| &g.grn_id == grn_id).unwrap();
                assert!(inv.invoice_date >= grn.grn_date);
            }
        }
    }

    #[test]
    fn grn_link_matches_po() {
        let (cfg, vendors, orders, grns, mut rng) = fixture();
        let mut seq = SequenceCounter::new();
        let invoices = generate_invoices(&cfg, &orders, &grns, &vendors, &mut seq, &mut rng);
        for inv in invoices.iter().filter(|i| i.grn_id.is_some()) {
            let grn = grns
                .iter()
                .find(|g| Some(&g.grn_id) == inv.grn_id.as_ref())
                .unwrap();
            assert_eq!(Some(&grn.po_id), inv.po_id.as_ref());
        }
    }

    #[test]
    fn totals_hold_before_normalization() {
        let (cfg, vendors, orders, grns, mut rng) = fixture();
        let mut seq = SequenceCounter::new();
        let invoices = generate_invoices(&cfg, &orders, &grns, &vendors, &mut seq, &mut rng);
        assert!(invoices
            .iter()
            .all(|i| i.total_amount == round2(i.invoice_amount + i.tax_amount)));
    }
}
