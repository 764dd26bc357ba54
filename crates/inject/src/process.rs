//! Process-layer injectors: approval-threshold violations, structural
//! duplicates, and detection-only checks that flag records already
//! violating a rule without mutating anything.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use grist_core::config::GenerationConfig;
use grist_core::records::{Dataset, DocStatus};
use grist_core::rng::SeedStream;

use crate::select::{select_source_and_targets, select_targets};
use crate::taxonomy::TestStep;
use crate::truth::TruthLog;

/// Clear approval evidence on requisitions above the approval threshold.
pub fn pr_unapproved(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    config: &GenerationConfig,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .pr_headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.total_amount > config.approval_threshold && h.approved_by.is_some())
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let header = &mut dataset.pr_headers[idx];
        header.approved_by = None;
        header.approved_date = None;
        header.status = DocStatus::Submitted;
        log.record(
            step,
            key,
            "pr_header",
            &header.pr_id.clone(),
            BTreeMap::new(),
            &["approved_by", "approved_date", "status"],
            format!(
                "{} exceeds threshold {} without approval",
                header.pr_id, config.approval_threshold
            ),
        );
    }
}

/// Structural copy of a source requisition header onto targets: same
/// requester, department, amount, and date under the target's own id.
pub fn duplicate_pr(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = (0..dataset.pr_headers.len()).collect();
    let Some((source, targets)) = select_source_and_targets(eligible, pct, rng) else {
        return;
    };
    let template = dataset.pr_headers[source].clone();
    for idx in targets {
        let header = &mut dataset.pr_headers[idx];
        header.requester = template.requester.clone();
        header.department = template.department.clone();
        header.total_amount = template.total_amount;
        header.pr_date = template.pr_date;
        let mut secondary = BTreeMap::new();
        secondary.insert("source_pr_id".to_string(), template.pr_id.clone());
        log.record(
            step,
            key,
            "pr_header",
            &header.pr_id.clone(),
            secondary,
            &["requester", "department", "total_amount", "pr_date"],
            format!("{} structurally duplicates {}", header.pr_id, template.pr_id),
        );
    }
}

/// Detection-only: flag POs priced suspiciously close under the
/// approval threshold (within 10% below it). No mutation.
pub fn po_split_threshold(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    config: &GenerationConfig,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let band_floor = config.approval_threshold * Decimal::new(90, 2);
    let eligible: Vec<usize> = dataset
        .purchase_orders
        .iter()
        .enumerate()
        .filter(|(_, p)| p.total_amount >= band_floor && p.total_amount < config.approval_threshold)
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let po = &dataset.purchase_orders[idx];
        let mut secondary = BTreeMap::new();
        secondary.insert("vendor_id".to_string(), po.vendor_id.clone());
        log.record(
            step,
            key,
            "purchase_order",
            &po.po_id,
            secondary,
            &[],
            format!(
                "{} priced {} just under threshold {}",
                po.po_id, po.total_amount, config.approval_threshold
            ),
        );
    }
}

/// Clear approval evidence on invoices above the approval threshold.
pub fn invoice_unapproved(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    config: &GenerationConfig,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .invoices
        .iter()
        .enumerate()
        .filter(|(_, i)| i.total_amount > config.approval_threshold && i.approved_by.is_some())
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let invoice = &mut dataset.invoices[idx];
        invoice.approved_by = None;
        invoice.approved_date = None;
        let mut secondary = BTreeMap::new();
        if let Some(po_id) = &invoice.po_id {
            secondary.insert("po_id".to_string(), po_id.clone());
        }
        log.record(
            step,
            key,
            "invoice",
            &invoice.invoice_number.clone(),
            secondary,
            &["approved_by", "approved_date"],
            format!(
                "{} exceeds threshold {} without approval",
                invoice.invoice_number, config.approval_threshold
            ),
        );
    }
}

/// Detection-only: flag payments at or above the high-value review bar
/// (2x the approval threshold).
pub fn high_value_payment(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    config: &GenerationConfig,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let bar = config.approval_threshold * Decimal::TWO;
    let eligible: Vec<usize> = dataset
        .payments
        .iter()
        .enumerate()
        .filter(|(_, p)| p.amount >= bar)
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let payment = &dataset.payments[idx];
        let mut secondary = BTreeMap::new();
        secondary.insert("invoice_number".to_string(), payment.invoice_number.clone());
        log.record(
            step,
            key,
            "payment",
            &payment.payment_id,
            secondary,
            &[],
            format!("{} of {} exceeds high-value review bar", payment.payment_id, payment.amount),
        );
    }
}

/// Detection-only: flag invoices whose vendor lacks a GST registration.
pub fn vendor_compliance(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let unregistered: Vec<String> = dataset
        .vendors
        .iter()
        .filter(|v| v.gstin.is_none())
        .map(|v| v.vendor_id.clone())
        .collect();
    let eligible: Vec<usize> = dataset
        .invoices
        .iter()
        .enumerate()
        .filter(|(_, i)| unregistered.contains(&i.vendor_id))
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let invoice = &dataset.invoices[idx];
        let mut secondary = BTreeMap::new();
        secondary.insert("vendor_id".to_string(), invoice.vendor_id.clone());
        log.record(
            step,
            key,
            "invoice",
            &invoice.invoice_number,
            secondary,
            &[],
            format!(
                "{} booked against unregistered vendor {}",
                invoice.invoice_number, invoice.vendor_id
            ),
        );
    }
}
