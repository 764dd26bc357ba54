//! C4 — Payment schedule. Every invoice gets a due date after
//! normalization, and no payment lands before its invoice.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use grist_core::records::Dataset;

#[derive(Debug, Clone, Serialize)]
pub struct C4Result {
    pub missing_due_dates: usize,
    pub early_payments: usize,
    pub violations: usize,
    pub first_instance: Option<String>,
    pub summary: String,
}

pub fn check_schedule(dataset: &Dataset) -> C4Result {
    let mut violations = 0;
    let mut first_instance = None;
    let mut missing_due_dates = 0;
    for invoice in &dataset.invoices {
        if invoice.due_date.is_none() {
            missing_due_dates += 1;
            violations += 1;
            if first_instance.is_none() {
                first_instance = Some(format!("{} has no due date", invoice.invoice_number));
            }
        }
    }

    let invoice_dates: BTreeMap<&str, Date> = dataset
        .invoices
        .iter()
        .map(|inv| (inv.invoice_number.as_str(), inv.invoice_date))
        .collect();
    let mut early_payments = 0;
    for payment in &dataset.payments {
        if let Some(invoice_date) = invoice_dates.get(payment.invoice_number.as_str()) {
            if payment.payment_date < *invoice_date {
                early_payments += 1;
                violations += 1;
                if first_instance.is_none() {
                    first_instance = Some(format!(
                        "{} paid on {} before invoice {} dated {}",
                        payment.payment_id,
                        payment.payment_date,
                        payment.invoice_number,
                        invoice_date
                    ));
                }
            }
        }
    }

    let summary = format!(
        "{} invoices without due dates, {} payments before their invoice",
        missing_due_dates, early_payments
    );
    C4Result {
        missing_due_dates,
        early_payments,
        violations,
        first_instance,
        summary,
    }
}
