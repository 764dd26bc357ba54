//! C3 — Invoice arithmetic. `total_amount` must equal
//! `round(invoice_amount + tax_amount, 2)` to within one paisa.

use rust_decimal::Decimal;
use serde::Serialize;

use grist_core::records::{round2, Dataset};

#[derive(Debug, Clone, Serialize)]
pub struct C3Result {
    pub checked: usize,
    pub violations: usize,
    pub first_instance: Option<String>,
    pub summary: String,
}

pub fn check_arithmetic(dataset: &Dataset) -> C3Result {
    let tolerance = Decimal::new(1, 2);
    let mut violations = 0;
    let mut first_instance = None;
    for invoice in &dataset.invoices {
        let expected = round2(invoice.invoice_amount + invoice.tax_amount);
        let diff = (invoice.total_amount - expected).abs();
        if diff > tolerance {
            violations += 1;
            if first_instance.is_none() {
                first_instance = Some(format!(
                    "{}: total {} but amount {} + tax {} = {}",
                    invoice.invoice_number,
                    invoice.total_amount,
                    invoice.invoice_amount,
                    invoice.tax_amount,
                    expected
                ));
            }
        }
    }
    let summary = format!(
        "{} of {} invoices fail the arithmetic identity",
        violations,
        dataset.invoices.len()
    );
    C3Result {
        checked: dataset.invoices.len(),
        violations,
        first_instance,
        summary,
    }
}
