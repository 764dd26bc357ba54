//! Payment synthesis.
//!
//! One payment per selected invoice (the schema carries invoice 1:N so
//! partial payments remain expressible). `payment_date >= invoice_date`
//! always holds here; the payment-before-invoice anomaly is a deliberate
//! later override by the injector.

use crate::config::GenerationConfig;
use crate::dates::downstream_date;
use crate::ids::{format_id, SequenceCounter, PAYMENT_PREFIX};
use crate::names;
use crate::records::{DocStatus, Invoice, Payment, PaymentMode};
use crate::rng::SeedStream;

const APPROVED_RATIO: f64 = 0.90;
const DATE_WINDOW_DAYS: i64 = 40;

const MODES: &[PaymentMode] = &[
    PaymentMode::Neft,
    PaymentMode::Rtgs,
    PaymentMode::Cheque,
    PaymentMode::Wire,
];

pub fn generate_payments(
    config: &GenerationConfig,
    invoices: &[Invoice],
    seq: &mut SequenceCounter,
    rng: &mut SeedStream,
) -> Vec<Payment> {
    let mut payments = Vec::new();
    for invoice in invoices {
        if invoice.status != DocStatus::Approved {
            continue;
        }
        if !rng.chance(config.payment_ratio) {
            continue;
        }
        let payment_date = downstream_date(rng, invoice.invoice_date, DATE_WINDOW_DAYS, 1);
        let payment_id =
            format_id(PAYMENT_PREFIX, payment_date.year(), seq.next(payment_date.year()));
        let mode = *rng.pick(MODES);
        let approved_by = rng.chance(APPROVED_RATIO).then(|| names::person_name(rng));
        let reference_no = names::utr_reference(rng);

        payments.push(Payment {
            payment_id,
            invoice_number: invoice.invoice_number.clone(),
            vendor_id: invoice.vendor_id.clone(),
            payment_date,
            amount: invoice.total_amount,
            mode,
            status: DocStatus::Completed,
            approved_by,
            reference_no,
        });
    }
    payments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;
    use crate::gen::invoice::generate_invoices;
    use crate::gen::order::generate_purchase_orders;
    use crate::gen::receipt::generate_grns;
    use crate::gen::vendor::generate_vendors;

    fn fixture() -> (GenerationConfig, Vec<Invoice>, SeedStream) {
        let cfg = GenerationConfig {
            seed: Seed::Int(17),
            vendor_count: 30,
            ..GenerationConfig::default()
        };
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let vendors = generate_vendors(&cfg, &mut rng);
        let mut po_seq = SequenceCounter::new();
        let orders = generate_purchase_orders(&cfg, &vendors, 200, &mut po_seq, &mut rng).unwrap();
        let mut grn_seq = SequenceCounter::new();
        let grns = generate_grns(&cfg, &orders, &mut grn_seq, &mut rng);
        let mut inv_seq = SequenceCounter::new();
        let invoices = generate_invoices(&cfg, &orders, &grns, &vendors, &mut inv_seq, &mut rng);
        (cfg, invoices, rng)
    }

    #[test]
    fn payments_follow_their_invoices() {
        let (cfg, invoices, mut rng) = fixture();
        let mut seq = SequenceCounter::new();
        let payments = generate_payments(&cfg, &invoices, &mut seq, &mut rng);
        assert!(!payments.is_empty());
        for pay in &payments {
            let inv = invoices
                .iter()
                .find(|i| i.invoice_number == pay.invoice_number)
                .unwrap();
            assert!(pay.payment_date > inv.invoice_date);
            assert_eq!(pay.amount, inv.total_amount);
            assert_eq!(pay.vendor_id, inv.vendor_id);
        }
    }

    #[test]
    fn only_approved_invoices_are_paid() {
        let (cfg, invoices, mut rng) = fixture();
        let mut seq = SequenceCounter::new();
        let payments = generate_payments(&cfg, &invoices, &mut seq, &mut rng);
        for pay in &payments {
            let inv = invoices
                .iter()
                .find(|i| i.invoice_number == pay.invoice_number)
                .unwrap();
            assert_eq!(inv.status, DocStatus::Approved);
        }
    }
}
