//! Post-generation constraint and normalization pass.
//!
//! Runs exactly once, after all base entities exist and before anomaly
//! injection. Four order-sensitive steps:
//!
//!   1. vendor concentration (top-cohort PO share quota)
//!   2. goods/service split (only goods POs carry GRNs)
//!   3. invoice arithmetic (total = round(amount + tax, 2), unconditional)
//!   4. schedule normalization (due-date fill, payment-date clamp)
//!
//! The payment-date clamp runs before injection on purpose: the
//! payment-before-invoice anomaly is a deliberate, distinct override.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GenerationConfig;
use crate::records::{round2, Dataset, PoCategory};
use crate::dates::add_days;
use crate::rng::SeedStream;

pub fn apply(dataset: &mut Dataset, config: &GenerationConfig, rng: &mut SeedStream) {
    enforce_vendor_concentration(dataset, config, rng);
    enforce_goods_service_split(dataset, config);
    normalize_invoice_arithmetic(dataset);
    normalize_schedule(dataset, config);
}

/// Step 1: the earliest-created `top_vendor_fraction` of vendors must
/// hold `top_vendor_share` of POs. Single pass with running quota
/// counters; POs that overflow their cohort's quota are reassigned to a
/// uniformly random vendor from the other cohort. Reassignment
/// propagates to documents already linked to the PO so vendor ids stay
/// consistent downstream.
fn enforce_vendor_concentration(
    dataset: &mut Dataset,
    config: &GenerationConfig,
    rng: &mut SeedStream,
) {
    let vendor_count = dataset.vendors.len();
    let po_count = dataset.purchase_orders.len();
    if vendor_count < 2 || po_count == 0 {
        return;
    }
    let top_len = ((vendor_count as f64 * config.top_vendor_fraction) as usize).max(1);

    // Vendors are generated in creation order already, but re-derive the
    // cohort from dates so the rule survives any upstream reordering.
    let mut by_created: Vec<usize> = (0..vendor_count).collect();
    by_created.sort_by_key(|&i| dataset.vendors[i].created_date);
    let top_ids: Vec<String> = by_created[..top_len]
        .iter()
        .map(|&i| dataset.vendors[i].vendor_id.clone())
        .collect();
    let other_ids: Vec<String> = by_created[top_len..]
        .iter()
        .map(|&i| dataset.vendors[i].vendor_id.clone())
        .collect();
    if other_ids.is_empty() {
        return;
    }
    let top_set: BTreeSet<&str> = top_ids.iter().map(String::as_str).collect();

    let top_target = (po_count as f64 * config.top_vendor_share).round() as usize;
    let other_target = po_count - top_target;
    let mut top_used = 0usize;
    let mut other_used = 0usize;
    let mut reassigned: BTreeMap<String, String> = BTreeMap::new();

    for po in &mut dataset.purchase_orders {
        let in_top = top_set.contains(po.vendor_id.as_str());
        if in_top {
            if top_used < top_target {
                top_used += 1;
            } else {
                let pick = rng.pick(&other_ids).clone();
                reassigned.insert(po.po_id.clone(), pick.clone());
                po.vendor_id = pick;
                other_used += 1;
            }
        } else if other_used < other_target {
            other_used += 1;
        } else {
            let pick = rng.pick(&top_ids).clone();
            reassigned.insert(po.po_id.clone(), pick.clone());
            po.vendor_id = pick;
            top_used += 1;
        }
    }

    if reassigned.is_empty() {
        return;
    }
    for grn in &mut dataset.grns {
        if let Some(vendor_id) = reassigned.get(&grn.po_id) {
            grn.vendor_id = vendor_id.clone();
        }
    }
    let mut invoice_vendor: BTreeMap<String, String> = BTreeMap::new();
    for invoice in &mut dataset.invoices {
        if let Some(vendor_id) = invoice.po_id.as_ref().and_then(|po| reassigned.get(po)) {
            invoice.vendor_id = vendor_id.clone();
            invoice_vendor.insert(invoice.invoice_number.clone(), vendor_id.clone());
        }
    }
    for payment in &mut dataset.payments {
        if let Some(vendor_id) = invoice_vendor.get(&payment.invoice_number) {
            payment.vendor_id = vendor_id.clone();
        }
    }
}

/// Step 2: classify the top `goods_ratio` of POs by total amount as
/// goods (non-destructive index sort), the rest as services; strip GRNs
/// on services POs and clear invoice references to stripped GRNs.
fn enforce_goods_service_split(dataset: &mut Dataset, config: &GenerationConfig) {
    let po_count = dataset.purchase_orders.len();
    if po_count == 0 {
        return;
    }
    let goods_len = (po_count as f64 * config.goods_ratio) as usize;

    let mut by_amount: Vec<usize> = (0..po_count).collect();
    by_amount.sort_by(|&a, &b| {
        dataset.purchase_orders[b]
            .total_amount
            .cmp(&dataset.purchase_orders[a].total_amount)
    });
    for (rank, &idx) in by_amount.iter().enumerate() {
        dataset.purchase_orders[idx].category = if rank < goods_len {
            PoCategory::Goods
        } else {
            PoCategory::Services
        };
    }

    let service_pos: BTreeSet<&str> = dataset
        .purchase_orders
        .iter()
        .filter(|po| po.category == PoCategory::Services)
        .map(|po| po.po_id.as_str())
        .collect();
    let stripped: BTreeSet<String> = dataset
        .grns
        .iter()
        .filter(|g| service_pos.contains(g.po_id.as_str()))
        .map(|g| g.grn_id.clone())
        .collect();
    dataset.grns.retain(|g| !stripped.contains(&g.grn_id));
    for invoice in &mut dataset.invoices {
        if let Some(grn_id) = &invoice.grn_id {
            if stripped.contains(grn_id) {
                invoice.grn_id = None;
            }
        }
    }
}

/// Step 3: force `total_amount = round2(invoice_amount + tax_amount)`
/// on every invoice, overwriting any prior value.
fn normalize_invoice_arithmetic(dataset: &mut Dataset) {
    for invoice in &mut dataset.invoices {
        invoice.total_amount = round2(invoice.invoice_amount + invoice.tax_amount);
    }
}

/// Step 4: fill missing due dates from `credit_days`; clamp payments
/// dated before their invoice up to the invoice date.
fn normalize_schedule(dataset: &mut Dataset, config: &GenerationConfig) {
    let mut invoice_dates = BTreeMap::new();
    for invoice in &mut dataset.invoices {
        if invoice.due_date.is_none() {
            invoice.due_date = Some(add_days(invoice.invoice_date, config.credit_days));
        }
        invoice_dates.insert(invoice.invoice_number.clone(), invoice.invoice_date);
    }
    for payment in &mut dataset.payments {
        if let Some(&invoice_date) = invoice_dates.get(&payment.invoice_number) {
            if payment.payment_date < invoice_date {
                payment.payment_date = invoice_date;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;
    use rust_decimal::Decimal;

    fn small_dataset() -> (GenerationConfig, Dataset, SeedStream) {
        let cfg = GenerationConfig {
            seed: Seed::Int(99),
            vendor_count: 20,
            po_count: 100,
            chunk_size: 40,
            ..GenerationConfig::default()
        };
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let dataset = crate::generate_base(&cfg, &mut rng).unwrap();
        (cfg, dataset, rng)
    }

    #[test]
    fn invoice_arithmetic_is_forced() {
        let (_, mut dataset, _) = small_dataset();
        if let Some(inv) = dataset.invoices.first_mut() {
            inv.total_amount = Decimal::ZERO;
        }
        normalize_invoice_arithmetic(&mut dataset);
        assert!(dataset
            .invoices
            .iter()
            .all(|i| i.total_amount == round2(i.invoice_amount + i.tax_amount)));
    }

    #[test]
    fn only_goods_pos_carry_grns() {
        let (cfg, mut dataset, _) = small_dataset();
        enforce_goods_service_split(&mut dataset, &cfg);
        let goods: BTreeSet<&str> = dataset
            .purchase_orders
            .iter()
            .filter(|po| po.category == PoCategory::Goods)
            .map(|po| po.po_id.as_str())
            .collect();
        assert!(dataset.grns.iter().all(|g| goods.contains(g.po_id.as_str())));
        // No invoice may reference a stripped GRN.
        let live: BTreeSet<&str> = dataset.grns.iter().map(|g| g.grn_id.as_str()).collect();
        assert!(dataset
            .invoices
            .iter()
            .filter_map(|i| i.grn_id.as_deref())
            .all(|g| live.contains(g)));
    }

    #[test]
    fn due_dates_filled_and_payments_clamped() {
        let (cfg, mut dataset, _) = small_dataset();
        normalize_schedule(&mut dataset, &cfg);
        assert!(dataset.invoices.iter().all(|i| i.due_date.is_some()));
        let dates: BTreeMap<&str, time::Date> = dataset
            .invoices
            .iter()
            .map(|i| (i.invoice_number.as_str(), i.invoice_date))
            .collect();
        for pay in &dataset.payments {
            if let Some(&d) = dates.get(pay.invoice_number.as_str()) {
                assert!(pay.payment_date >= d);
            }
        }
    }

    #[test]
    fn top_cohort_reaches_target_share() {
        let (cfg, mut dataset, mut rng) = small_dataset();
        enforce_vendor_concentration(&mut dataset, &cfg, &mut rng);
        let top_len = ((dataset.vendors.len() as f64 * cfg.top_vendor_fraction) as usize).max(1);
        let mut by_created: Vec<&crate::records::Vendor> = dataset.vendors.iter().collect();
        by_created.sort_by_key(|v| v.created_date);
        let top: BTreeSet<&str> = by_created[..top_len]
            .iter()
            .map(|v| v.vendor_id.as_str())
            .collect();
        let top_pos = dataset
            .purchase_orders
            .iter()
            .filter(|po| top.contains(po.vendor_id.as_str()))
            .count();
        let target = (dataset.purchase_orders.len() as f64 * cfg.top_vendor_share).round() as usize;
        assert_eq!(top_pos, target);
    }

    #[test]
    fn concentration_keeps_vendor_consistency() {
        let (cfg, mut dataset, mut rng) = small_dataset();
        enforce_vendor_concentration(&mut dataset, &cfg, &mut rng);
        let po_vendor: BTreeMap<&str, &str> = dataset
            .purchase_orders
            .iter()
            .map(|po| (po.po_id.as_str(), po.vendor_id.as_str()))
            .collect();
        for grn in &dataset.grns {
            assert_eq!(po_vendor[grn.po_id.as_str()], grn.vendor_id);
        }
        for invoice in &dataset.invoices {
            if let Some(po_id) = invoice.po_id.as_deref() {
                assert_eq!(po_vendor[po_id], invoice.vendor_id);
            }
        }
    }
}
