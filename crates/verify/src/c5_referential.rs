//! C5 — Referential integrity. Every foreign key across the
//! transactional chain must resolve: GRN→PO, Invoice→PO and
//! Invoice→GRN where present, Payment→Invoice.

use std::collections::BTreeSet;

use serde::Serialize;

use grist_core::records::Dataset;

#[derive(Debug, Clone, Serialize)]
pub struct C5Result {
    pub dangling_grn_po: usize,
    pub dangling_invoice_po: usize,
    pub dangling_invoice_grn: usize,
    pub dangling_payment_invoice: usize,
    pub violations: usize,
    pub first_instance: Option<String>,
    pub summary: String,
}

pub fn check_referential(dataset: &Dataset) -> C5Result {
    let po_ids: BTreeSet<&str> = dataset
        .purchase_orders
        .iter()
        .map(|po| po.po_id.as_str())
        .collect();
    let grn_ids: BTreeSet<&str> = dataset.grns.iter().map(|g| g.grn_id.as_str()).collect();
    let invoice_numbers: BTreeSet<&str> = dataset
        .invoices
        .iter()
        .map(|inv| inv.invoice_number.as_str())
        .collect();

    let mut violations = 0;
    let mut first_instance: Option<String> = None;
    let mut note = |count: &mut usize, first: String| {
        *count += 1;
        violations += 1;
        if first_instance.is_none() {
            first_instance = Some(first);
        }
    };

    let mut dangling_grn_po = 0;
    for grn in &dataset.grns {
        if !po_ids.contains(grn.po_id.as_str()) {
            note(
                &mut dangling_grn_po,
                format!("{} references unknown purchase order {}", grn.grn_id, grn.po_id),
            );
        }
    }

    let mut dangling_invoice_po = 0;
    let mut dangling_invoice_grn = 0;
    for invoice in &dataset.invoices {
        if let Some(ref po_id) = invoice.po_id {
            if !po_ids.contains(po_id.as_str()) {
                note(
                    &mut dangling_invoice_po,
                    format!(
                        "{} references unknown purchase order {}",
                        invoice.invoice_number, po_id
                    ),
                );
            }
        }
        if let Some(ref grn_id) = invoice.grn_id {
            if !grn_ids.contains(grn_id.as_str()) {
                note(
                    &mut dangling_invoice_grn,
                    format!(
                        "{} references unknown goods receipt {}",
                        invoice.invoice_number, grn_id
                    ),
                );
            }
        }
    }

    let mut dangling_payment_invoice = 0;
    for payment in &dataset.payments {
        if !invoice_numbers.contains(payment.invoice_number.as_str()) {
            note(
                &mut dangling_payment_invoice,
                format!(
                    "{} references unknown invoice {}",
                    payment.payment_id, payment.invoice_number
                ),
            );
        }
    }

    let summary = format!("{} unresolved references", violations);
    C5Result {
        dangling_grn_po,
        dangling_invoice_po,
        dangling_invoice_grn,
        dangling_payment_invoice,
        violations,
        first_instance,
        summary,
    }
}
