//! Vendor-master anomaly injectors.

use std::collections::BTreeMap;

use grist_core::records::{Dataset, VendorStatus};
use grist_core::rng::SeedStream;

use crate::select::{select_source_and_targets, select_targets};
use crate::taxonomy::TestStep;
use crate::truth::TruthLog;

/// Clear present PAN/GSTIN identifiers on selected vendors.
pub fn missing_tax_id(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .vendors
        .iter()
        .enumerate()
        .filter(|(_, v)| v.pan.is_some() || v.gstin.is_some())
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let vendor = &mut dataset.vendors[idx];
        let mut fields = Vec::new();
        if vendor.pan.take().is_some() {
            fields.push("pan");
        }
        if vendor.gstin.take().is_some() {
            fields.push("gstin");
        }
        log.record(
            step,
            key,
            "vendor",
            &vendor.vendor_id.clone(),
            BTreeMap::new(),
            &fields,
            format!("statutory tax identifiers removed from {}", vendor.vendor_id),
        );
    }
}

/// Copy one source vendor's PAN onto N target vendors.
pub fn duplicate_vendor_pan(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .vendors
        .iter()
        .enumerate()
        .filter(|(_, v)| v.pan.is_some())
        .map(|(i, _)| i)
        .collect();
    let Some((source, targets)) = select_source_and_targets(eligible, pct, rng) else {
        return;
    };
    let source_id = dataset.vendors[source].vendor_id.clone();
    let source_pan = dataset.vendors[source].pan.clone();
    for idx in targets {
        let vendor = &mut dataset.vendors[idx];
        vendor.pan = source_pan.clone();
        let mut secondary = BTreeMap::new();
        secondary.insert("source_vendor_id".to_string(), source_id.clone());
        log.record(
            step,
            key,
            "vendor",
            &vendor.vendor_id.clone(),
            secondary,
            &["pan"],
            format!("PAN duplicated from {} onto {}", source_id, vendor.vendor_id),
        );
    }
}

/// Copy one source vendor's bank account and routing code onto N targets.
pub fn duplicate_bank_account(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .vendors
        .iter()
        .enumerate()
        .filter(|(_, v)| v.bank_account.is_some())
        .map(|(i, _)| i)
        .collect();
    let Some((source, targets)) = select_source_and_targets(eligible, pct, rng) else {
        return;
    };
    let source_id = dataset.vendors[source].vendor_id.clone();
    let account = dataset.vendors[source].bank_account.clone();
    let ifsc = dataset.vendors[source].bank_ifsc.clone();
    for idx in targets {
        let vendor = &mut dataset.vendors[idx];
        vendor.bank_account = account.clone();
        vendor.bank_ifsc = ifsc.clone();
        let mut secondary = BTreeMap::new();
        secondary.insert("source_vendor_id".to_string(), source_id.clone());
        log.record(
            step,
            key,
            "vendor",
            &vendor.vendor_id.clone(),
            secondary,
            &["bank_account", "bank_ifsc"],
            format!("bank details duplicated from {} onto {}", source_id, vendor.vendor_id),
        );
    }
}

/// Clear verification actor and date: vendor created without approval.
pub fn vendor_unapproved(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .vendors
        .iter()
        .enumerate()
        .filter(|(_, v)| v.approved_by.is_some())
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let vendor = &mut dataset.vendors[idx];
        vendor.approved_by = None;
        vendor.approved_date = None;
        log.record(
            step,
            key,
            "vendor",
            &vendor.vendor_id.clone(),
            BTreeMap::new(),
            &["approved_by", "approved_date"],
            format!("approval evidence removed from {}", vendor.vendor_id),
        );
    }
}

/// Force the bank re-verification flag to false.
pub fn unverified_bank_change(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .vendors
        .iter()
        .enumerate()
        .filter(|(_, v)| v.bank_verified)
        .map(|(i, _)| i)
        .collect();
    for idx in select_targets(eligible, pct, rng) {
        let vendor = &mut dataset.vendors[idx];
        vendor.bank_verified = false;
        log.record(
            step,
            key,
            "vendor",
            &vendor.vendor_id.clone(),
            BTreeMap::new(),
            &["bank_verified"],
            format!("bank change left unverified on {}", vendor.vendor_id),
        );
    }
}

/// Flip selected active vendors to inactive, then emit one truth record
/// per PO/invoice/payment referencing them. Output cardinality follows
/// downstream fan-out, not the vendor count.
pub fn inactive_vendor_usage(
    dataset: &mut Dataset,
    pct: f64,
    step: &TestStep,
    key: &str,
    rng: &mut SeedStream,
    log: &mut TruthLog,
) {
    let eligible: Vec<usize> = dataset
        .vendors
        .iter()
        .enumerate()
        .filter(|(_, v)| v.status == VendorStatus::Active)
        .map(|(i, _)| i)
        .collect();
    let mut flipped = Vec::new();
    for idx in select_targets(eligible, pct, rng) {
        dataset.vendors[idx].status = VendorStatus::Inactive;
        flipped.push(dataset.vendors[idx].vendor_id.clone());
    }
    if flipped.is_empty() {
        return;
    }

    let secondary = |vendor_id: &str| {
        let mut m = BTreeMap::new();
        m.insert("vendor_id".to_string(), vendor_id.to_string());
        m
    };
    for po in &dataset.purchase_orders {
        if flipped.contains(&po.vendor_id) {
            log.record(
                step,
                key,
                "purchase_order",
                &po.po_id,
                secondary(&po.vendor_id),
                &["status"],
                format!("{} references deactivated vendor {}", po.po_id, po.vendor_id),
            );
        }
    }
    for invoice in &dataset.invoices {
        if flipped.contains(&invoice.vendor_id) {
            log.record(
                step,
                key,
                "invoice",
                &invoice.invoice_number,
                secondary(&invoice.vendor_id),
                &["status"],
                format!(
                    "{} references deactivated vendor {}",
                    invoice.invoice_number, invoice.vendor_id
                ),
            );
        }
    }
    for payment in &dataset.payments {
        if flipped.contains(&payment.vendor_id) {
            log.record(
                step,
                key,
                "payment",
                &payment.payment_id,
                secondary(&payment.vendor_id),
                &["status"],
                format!(
                    "{} references deactivated vendor {}",
                    payment.payment_id, payment.vendor_id
                ),
            );
        }
    }
}
