//! C6 — Date ordering along the process chain: PO, then receipt, then
//! invoice, then payment.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use grist_core::records::Dataset;

#[derive(Debug, Clone, Serialize)]
pub struct C6Result {
    pub grn_before_po: usize,
    pub invoice_before_upstream: usize,
    pub payment_before_invoice: usize,
    pub violations: usize,
    pub first_instance: Option<String>,
    pub summary: String,
}

pub fn check_date_order(dataset: &Dataset) -> C6Result {
    let po_dates: BTreeMap<&str, Date> = dataset
        .purchase_orders
        .iter()
        .map(|po| (po.po_id.as_str(), po.po_date))
        .collect();
    let grn_dates: BTreeMap<&str, Date> = dataset
        .grns
        .iter()
        .map(|g| (g.grn_id.as_str(), g.grn_date))
        .collect();
    let invoice_dates: BTreeMap<&str, Date> = dataset
        .invoices
        .iter()
        .map(|inv| (inv.invoice_number.as_str(), inv.invoice_date))
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

    let mut grn_before_po = 0;
    for grn in &dataset.grns {
        if let Some(po_date) = po_dates.get(grn.po_id.as_str()) {
            if grn.grn_date < *po_date {
                note(
                    &mut grn_before_po,
                    format!("{} received {} before order date {}", grn.grn_id, grn.grn_date, po_date),
                );
            }
        }
    }

    let mut invoice_before_upstream = 0;
    for invoice in &dataset.invoices {
        let mut floor: Option<Date> = invoice
            .po_id
            .as_deref()
            .and_then(|id| po_dates.get(id))
            .copied();
        if let Some(grn_date) = invoice.grn_id.as_deref().and_then(|id| grn_dates.get(id)) {
            floor = Some(match floor {
                Some(d) if d > *grn_date => d,
                _ => *grn_date,
            });
        }
        if let Some(floor) = floor {
            if invoice.invoice_date < floor {
                note(
                    &mut invoice_before_upstream,
                    format!(
                        "{} dated {} precedes its upstream documents ({})",
                        invoice.invoice_number, invoice.invoice_date, floor
                    ),
                );
            }
        }
    }

    let mut payment_before_invoice = 0;
    for payment in &dataset.payments {
        if let Some(invoice_date) = invoice_dates.get(payment.invoice_number.as_str()) {
            if payment.payment_date < *invoice_date {
                note(
                    &mut payment_before_invoice,
                    format!(
                        "{} dated {} precedes invoice date {}",
                        payment.payment_id, payment.payment_date, invoice_date
                    ),
                );
            }
        }
    }

    let summary = format!("{} documents out of date order", violations);
    C6Result {
        grn_before_po,
        invoice_before_upstream,
        payment_before_invoice,
        violations,
        first_instance,
        summary,
    }
}
