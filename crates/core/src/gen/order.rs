//! Purchase order synthesis.
//!
//! Dates are drawn uniformly over the configured window and sorted
//! ascending within the batch before sequence allocation, so id sequence
//! numbers increase with date inside each chunk.

use rust_decimal::Decimal;

use crate::config::GenerationConfig;
use crate::dates::{add_days, random_date_in, year_end, year_start};
use crate::error::GenError;
use crate::gen::money_between;
use crate::ids::{format_id, SequenceCounter, PO_PREFIX};
use crate::names;
use crate::records::{round2, DocStatus, PoCategory, PurchaseOrder, Vendor, VendorStatus};
use crate::rng::SeedStream;

const APPROVED_RATIO: f64 = 0.90;
const GOODS_RATIO_AT_GEN: f64 = 0.60;

/// GST rate slabs, in percent.
const TAX_RATES: &[i64] = &[5, 12, 18, 28];

fn draw_status(rng: &mut SeedStream) -> DocStatus {
    let roll = rng.next_f64();
    if roll < 0.80 {
        DocStatus::Approved
    } else if roll < 0.90 {
        DocStatus::Completed
    } else if roll < 0.95 {
        DocStatus::Submitted
    } else {
        DocStatus::Cancelled
    }
}

/// Generate one batch of purchase orders against the active vendor pool.
///
/// `seq` carries the running per-year PO sequence across batches.
pub fn generate_purchase_orders(
    config: &GenerationConfig,
    vendors: &[Vendor],
    count: usize,
    seq: &mut SequenceCounter,
    rng: &mut SeedStream,
) -> Result<Vec<PurchaseOrder>, GenError> {
    let eligible: Vec<&Vendor> = vendors
        .iter()
        .filter(|v| v.status == VendorStatus::Active)
        .collect();
    if eligible.is_empty() {
        return Err(GenError::empty_upstream("active vendors", "purchase order"));
    }

    let lo = year_start(config.start_year);
    let hi = year_end(config.end_year);
    let mut dates: Vec<_> = (0..count).map(|_| random_date_in(rng, lo, hi)).collect();
    dates.sort_unstable();

    let mut orders = Vec::with_capacity(count);
    for po_date in dates {
        let po_id = format_id(PO_PREFIX, po_date.year(), seq.next(po_date.year()));
        let vendor = *rng.pick(&eligible);
        let order_amount = money_between(rng, 5_000, 500_000);
        let tax_rate = *rng.pick(TAX_RATES);
        let tax_amount = round2(order_amount * Decimal::new(tax_rate, 2));
        let total_amount = round2(order_amount + tax_amount);
        let category = if rng.chance(GOODS_RATIO_AT_GEN) {
            PoCategory::Goods
        } else {
            PoCategory::Services
        };
        let status = draw_status(rng);
        let created_by = names::person_name(rng);
        let (approved_by, approved_date) = if rng.chance(APPROVED_RATIO) {
            (
                Some(names::person_name(rng)),
                Some(add_days(po_date, rng.range_i64(0, 5))),
            )
        } else {
            (None, None)
        };
        let delivery_date = add_days(po_date, rng.range_i64(7, 30));

        orders.push(PurchaseOrder {
            po_id,
            vendor_id: vendor.vendor_id.clone(),
            po_date,
            delivery_date,
            order_amount,
            tax_amount,
            total_amount,
            category,
            status,
            created_by,
            approved_by,
            approved_date,
            contract_id: None,
        });
    }

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;
    use crate::gen::vendor::generate_vendors;

    fn setup() -> (GenerationConfig, Vec<Vendor>, SeedStream) {
        let cfg = GenerationConfig {
            seed: Seed::Int(42),
            vendor_count: 50,
            ..GenerationConfig::default()
        };
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let vendors = generate_vendors(&cfg, &mut rng);
        (cfg, vendors, rng)
    }

    #[test]
    fn dates_sorted_and_in_window() {
        let (cfg, vendors, mut rng) = setup();
        let mut seq = SequenceCounter::new();
        let orders = generate_purchase_orders(&cfg, &vendors, 200, &mut seq, &mut rng).unwrap();
        assert_eq!(orders.len(), 200);
        assert!(orders.windows(2).all(|w| w[0].po_date <= w[1].po_date));
        let lo = year_start(cfg.start_year);
        let hi = year_end(cfg.end_year);
        assert!(orders.iter().all(|o| o.po_date >= lo && o.po_date <= hi));
    }

    #[test]
    fn totals_are_amount_plus_tax() {
        let (cfg, vendors, mut rng) = setup();
        let mut seq = SequenceCounter::new();
        let orders = generate_purchase_orders(&cfg, &vendors, 100, &mut seq, &mut rng).unwrap();
        assert!(orders
            .iter()
            .all(|o| o.total_amount == round2(o.order_amount + o.tax_amount)));
    }

    #[test]
    fn no_active_vendors_fails_fast() {
        let (cfg, mut vendors, mut rng) = setup();
        for v in &mut vendors {
            v.status = VendorStatus::Inactive;
        }
        let mut seq = SequenceCounter::new();
        let err = generate_purchase_orders(&cfg, &vendors, 10, &mut seq, &mut rng).unwrap_err();
        assert!(matches!(err, GenError::EmptyUpstream { .. }));
    }

    #[test]
    fn references_only_active_vendors() {
        let (cfg, vendors, mut rng) = setup();
        let mut seq = SequenceCounter::new();
        let orders = generate_purchase_orders(&cfg, &vendors, 100, &mut seq, &mut rng).unwrap();
        let active: Vec<&str> = vendors
            .iter()
            .filter(|v| v.status == VendorStatus::Active)
            .map(|v| v.vendor_id.as_str())
            .collect();
        assert!(orders.iter().all(|o| active.contains(&o.vendor_id.as_str())));
    }
}
