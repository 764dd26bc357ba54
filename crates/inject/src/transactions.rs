//! Transaction-document anomaly injectors: invoices, payments, receipts.

use std::collections::BTreeMap;

use grist_core::dates::add_days;
use grist_core::records::Dataset;
use grist_core::rng::SeedStream;

use crate::select::{select_source_and_targets, select_targets};
use crate::taxonomy::TestStep;
use crate::truth::TruthLog;

/// Copy one source invoice number onto N other invoices, leaving
/// literal duplicate primary keys in the table.
pub fn duplicate_invoice_number(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = (0..dataset.invoices.len()).collect();
    let Some((source, targets)) = select_source_and_targets(eligible, pct, rng) else {
        return;
    };
    let source_number = dataset.invoices[source].invoice_number.clone();
    for idx in targets {
        let invoice = &mut dataset.invoices[idx];
        let replaced = std::mem::replace(&mut invoice.invoice_number, source_number.clone());
        let mut secondary = BTreeMap::new();
        secondary.insert("replaced_invoice_number".to_string(), replaced.clone());
        log.record(
            step,
            key,
            "invoice",
            &source_number,
            secondary,
            &["invoice_number"],
            format!("invoice number {} duplicated over {}", source_number, replaced),
        );
    }
}

/// Strip the GRN reference from invoices that previously had one.
pub fn invoice_without_grn(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .invoices
        .iter()
        .enumerate()
        .filter(|(_, i)| i.grn_id.is_some())
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let invoice = &mut dataset.invoices[idx];
        let removed = invoice.grn_id.take().unwrap_or_default();
        let mut secondary = BTreeMap::new();
        secondary.insert("removed_grn_id".to_string(), removed);
        if let Some(po_id) = &invoice.po_id {
            secondary.insert("po_id".to_string(), po_id.clone());
        }
        log.record(
            step,
            key,
            "invoice",
            &invoice.invoice_number.clone(),
            secondary,
            &["grn_id"],
            format!("goods-receipt link removed from {}", invoice.invoice_number),
        );
    }
}

/// Date selected payments 1-30 days before their invoice, overriding
/// whatever the schedule normalization set.
pub fn payment_before_invoice(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let invoice_dates: BTreeMap<String, time::Date> = dataset
        .invoices
        .iter()
        .map(|i| (i.invoice_number.clone(), i.invoice_date))
        .collect();
    let eligible: Vec<usize> = dataset
        .payments
        .iter()
        .enumerate()
        .filter(|(_, p)| invoice_dates.contains_key(&p.invoice_number))
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let days_before = rng.range_i64(1, 30);
        let payment = &mut dataset.payments[idx];
        let invoice_date = invoice_dates[&payment.invoice_number];
        payment.payment_date = add_days(invoice_date, -days_before);
        let mut secondary = BTreeMap::new();
        secondary.insert("invoice_number".to_string(), payment.invoice_number.clone());
        log.record(
            step,
            key,
            "payment",
            &payment.payment_id.clone(),
            secondary,
            &["payment_date"],
            format!(
                "{} dated {} days before its invoice",
                payment.payment_id, days_before
            ),
        );
    }
}

/// Push receipt dates far past the delivery window.
pub fn delayed_receipt(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let delivery_dates: BTreeMap<String, time::Date> = dataset
        .purchase_orders
        .iter()
        .map(|p| (p.po_id.clone(), p.delivery_date))
        .collect();
    let eligible: Vec<usize> = dataset
        .grns
        .iter()
        .enumerate()
        .filter(|(_, g)| delivery_dates.contains_key(&g.po_id))
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let delay = rng.range_i64(30, 90);
        let grn = &mut dataset.grns[idx];
        grn.grn_date = add_days(delivery_dates[&grn.po_id], delay);
        let mut secondary = BTreeMap::new();
        secondary.insert("po_id".to_string(), grn.po_id.clone());
        log.record(
            step,
            key,
            "grn",
            &grn.grn_id.clone(),
            secondary,
            &["grn_date"],
            format!("{} received {} days past delivery window", grn.grn_id, delay),
        );
    }
}

/// Short-receive full receipts: qty_received drops below qty_ordered.
pub fn partial_receipt(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .grns
        .iter()
        .enumerate()
        .filter(|(_, g)| g.qty_received == g.qty_ordered && g.qty_ordered >= 2)
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let grn = &mut dataset.grns[idx];
        grn.qty_received = rng.range_i64(1, grn.qty_ordered - 1);
        let mut secondary = BTreeMap::new();
        secondary.insert("po_id".to_string(), grn.po_id.clone());
        log.record(
            step,
            key,
            "grn",
            &grn.grn_id.clone(),
            secondary,
            &["qty_received"],
            format!(
                "{} short-received: {} of {}",
                grn.grn_id, grn.qty_received, grn.qty_ordered
            ),
        );
    }
}
