//! Sourcing documents: vendor contracts, quotation rounds, and the
//! role-assignment table. Runs after the full PO list exists; contract
//! links are written back onto matching POs.

use std::collections::BTreeMap;

use crate::config::GenerationConfig;
use crate::dates::{add_days, random_date_in, year_end, year_start};
use crate::gen::{jittered_amount, money_between};
use crate::ids::{format_id, SequenceCounter, CONTRACT_PREFIX, QUOTATION_PREFIX, ROLE_PREFIX};
use crate::names;
use crate::records::{
    Contract, DocStatus, PurchaseOrder, Quotation, QuoteStatus, RoleAssignment, Vendor,
    VendorStatus,
};
use crate::rng::SeedStream;

const CONTRACTED_VENDOR_RATIO: f64 = 0.30;
const PO_UNDER_CONTRACT_RATIO: f64 = 0.70;
const QUOTED_PO_RATIO: f64 = 0.40;
const QUOTE_VARIANCE_PCT: f64 = 8.0;

const ROLES: &[&str] = &["Requester", "Approver", "Buyer", "Receiver", "AP Clerk"];

pub struct SourcingDocs {
    pub quotations: Vec<Quotation>,
    pub contracts: Vec<Contract>,
    pub role_assignments: Vec<RoleAssignment>,
}

/// Generate contracts, quotations, roles, and backfill `contract_id`
/// onto POs whose vendor holds an active contract.
pub fn generate_sourcing(
    config: &GenerationConfig,
    vendors: &[Vendor],
    orders: &mut [PurchaseOrder],
    rng: &mut SeedStream,
) -> SourcingDocs {
    let contracts = generate_contracts(vendors, rng);
    let contract_by_vendor: BTreeMap<&str, &str> = contracts
        .iter()
        .map(|c| (c.vendor_id.as_str(), c.contract_id.as_str()))
        .collect();
    for po in orders.iter_mut() {
        if let Some(contract_id) = contract_by_vendor.get(po.vendor_id.as_str()) {
            if rng.chance(PO_UNDER_CONTRACT_RATIO) {
                po.contract_id = Some((*contract_id).to_string());
            }
        }
    }

    let quotations = generate_quotations(vendors, orders, rng);
    let role_assignments = generate_roles(config, rng);

    SourcingDocs {
        quotations,
        contracts,
        role_assignments,
    }
}

fn generate_contracts(vendors: &[Vendor], rng: &mut SeedStream) -> Vec<Contract> {
    let mut seq = SequenceCounter::new();
    let mut contracts = Vec::new();
    for vendor in vendors.iter().filter(|v| v.status == VendorStatus::Active) {
        if !rng.chance(CONTRACTED_VENDOR_RATIO) {
            continue;
        }
        let start_date = add_days(vendor.created_date, rng.range_i64(0, 90));
        let end_date = add_days(start_date, rng.range_i64(365, 1095));
        let contract_id =
            format_id(CONTRACT_PREFIX, start_date.year(), seq.next(start_date.year()));
        contracts.push(Contract {
            contract_id,
            vendor_id: vendor.vendor_id.clone(),
            start_date,
            end_date,
            contract_value: money_between(rng, 100_000, 5_000_000),
            status: DocStatus::Approved,
        });
    }
    contracts
}

fn generate_quotations(
    vendors: &[Vendor],
    orders: &[PurchaseOrder],
    rng: &mut SeedStream,
) -> Vec<Quotation> {
    let mut seq = SequenceCounter::new();
    let mut quotations = Vec::new();
    for po in orders {
        if !rng.chance(QUOTED_PO_RATIO) {
            continue;
        }
        let quote_date = add_days(po.po_date, -rng.range_i64(5, 20));
        let round_size = rng.index(2) + 2; // 2 or 3 quotes per round

        // The winning quote always comes from the PO's vendor.
        let (win_amount, _) =
            jittered_amount(rng, po.order_amount, po.tax_amount, QUOTE_VARIANCE_PCT);
        quotations.push(Quotation {
            quote_id: format_id(QUOTATION_PREFIX, quote_date.year(), seq.next(quote_date.year())),
            po_id: po.po_id.clone(),
            vendor_id: po.vendor_id.clone(),
            quote_date,
            amount: win_amount,
            status: QuoteStatus::Selected,
        });
        for _ in 1..round_size {
            let rival = rng.pick(vendors);
            let (amount, _) =
                jittered_amount(rng, po.order_amount, po.tax_amount, QUOTE_VARIANCE_PCT * 2.0);
            let status = if rng.chance(0.5) {
                QuoteStatus::Rejected
            } else {
                QuoteStatus::Received
            };
            quotations.push(Quotation {
                quote_id: format_id(
                    QUOTATION_PREFIX,
                    quote_date.year(),
                    seq.next(quote_date.year()),
                ),
                po_id: po.po_id.clone(),
                vendor_id: rival.vendor_id.clone(),
                quote_date,
                amount,
                status,
            });
        }
    }
    quotations
}

fn generate_roles(config: &GenerationConfig, rng: &mut SeedStream) -> Vec<RoleAssignment> {
    let user_count = (config.vendor_count / 10).max(5);
    let lo = year_start(config.start_year - 2);
    let hi = year_end(config.start_year - 1);
    let mut seq = SequenceCounter::new();
    let mut assignments = Vec::with_capacity(user_count);
    for _ in 0..user_count {
        let granted_date = random_date_in(rng, lo, hi);
        assignments.push(RoleAssignment {
            assignment_id: format_id(ROLE_PREFIX, granted_date.year(), seq.next(granted_date.year())),
            user_name: names::person_name(rng),
            role: (*rng.pick(ROLES)).to_string(),
            department: names::department(rng),
            granted_date,
            active: rng.chance(0.95),
        });
    }
    assignments
}
