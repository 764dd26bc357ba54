//! Per-entity synthesis functions.
//!
//! Each generator is a pure function of (config, upstream entities,
//! seed stream, date bounds) and is called in a fixed dependency order:
//! vendors, then per-chunk POs/GRNs/invoices/payments, then
//! requisitions/sourcing documents, then workflow and change logs.
//! Reordering calls would reorder stream draws and change every
//! downstream value, so the call order is part of the contract.

pub mod invoice;
pub mod logs;
pub mod order;
pub mod payment;
pub mod receipt;
pub mod requisition;
pub mod sourcing;
pub mod vendor;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::records::round2;
use crate::rng::SeedStream;

/// Copy an upstream base amount with symmetric percentage jitter, then
/// recompute tax at the original rate.
///
/// `adjusted = round2(amount * (1 + (rng*2 - 1) * variance_pct / 100))`
/// `tax      = round2(adjusted * (orig_tax / orig_amount))`
pub(crate) fn jittered_amount(
    rng: &mut SeedStream,
    amount: Decimal,
    tax: Decimal,
    variance_pct: f64,
) -> (Decimal, Decimal) {
    let factor = 1.0 + (rng.next_f64() * 2.0 - 1.0) * variance_pct / 100.0;
    let factor = Decimal::from_f64(factor).unwrap_or(Decimal::ONE);
    let adjusted = round2(amount * factor);
    let adjusted_tax = if amount.is_zero() {
        Decimal::ZERO
    } else {
        round2(adjusted * tax / amount)
    };
    (adjusted, adjusted_tax)
}

/// Draw a monetary amount as exact paise in [lo, hi] rupees.
pub(crate) fn money_between(rng: &mut SeedStream, lo: i64, hi: i64) -> Decimal {
    Decimal::new(rng.range_i64(lo * 100, hi * 100), 2)
}
