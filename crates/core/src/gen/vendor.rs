//! Vendor master synthesis.
//!
//! Vendors onboard in the two calendar years preceding the transaction
//! window so every transaction postdates its vendor's creation. All
//! optional fields are per-vendor independent Bernoulli trials.

use crate::config::GenerationConfig;
use crate::dates::{add_days, random_date_in, year_end, year_start};
use crate::ids::{format_id, SequenceCounter, VENDOR_PREFIX};
use crate::names;
use crate::records::{Vendor, VendorStatus};
use crate::rng::SeedStream;

const PAN_RATIO: f64 = 0.90;
const GSTIN_RATIO: f64 = 0.85;
const BANK_RATIO: f64 = 0.80;
const ACTIVE_RATIO: f64 = 0.92;
const APPROVED_RATIO: f64 = 0.88;
const BANK_VERIFIED_RATIO: f64 = 0.90;

const PAYMENT_TERMS: &[i64] = &[15, 30, 45, 60];

pub fn generate_vendors(config: &GenerationConfig, rng: &mut SeedStream) -> Vec<Vendor> {
    let onboard_lo = year_start(config.start_year - 2);
    let onboard_hi = year_end(config.start_year - 1);
    let mut seq = SequenceCounter::new();
    let mut vendors = Vec::with_capacity(config.vendor_count);

    for _ in 0..config.vendor_count {
        let created_date = random_date_in(rng, onboard_lo, onboard_hi);
        let vendor_id = format_id(VENDOR_PREFIX, created_date.year(), seq.next(created_date.year()));
        let vendor_name = names::vendor_name(rng);

        let pan = rng.chance(PAN_RATIO).then(|| names::pan(rng));
        let gstin = match &pan {
            Some(p) if rng.chance(GSTIN_RATIO) => Some(names::gstin(rng, p)),
            _ => None,
        };
        let has_bank = rng.chance(BANK_RATIO);
        let (bank_account, bank_ifsc) = if has_bank {
            (Some(names::bank_account(rng)), Some(names::ifsc(rng)))
        } else {
            (None, None)
        };

        let status = if rng.chance(ACTIVE_RATIO) {
            VendorStatus::Active
        } else {
            VendorStatus::Inactive
        };
        let created_by = names::person_name(rng);
        let (approved_by, approved_date) = if rng.chance(APPROVED_RATIO) {
            let actor = names::person_name(rng);
            let date = add_days(created_date, rng.range_i64(0, 10));
            (Some(actor), Some(date))
        } else {
            (None, None)
        };
        let bank_verified = has_bank && rng.chance(BANK_VERIFIED_RATIO);
        let payment_terms_days = *rng.pick(PAYMENT_TERMS);

        vendors.push(Vendor {
            vendor_id,
            vendor_name,
            pan,
            gstin,
            bank_account,
            bank_ifsc,
            status,
            created_date,
            created_by,
            approved_by,
            approved_date,
            bank_verified,
            payment_terms_days,
        });
    }

    vendors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;

    fn config() -> GenerationConfig {
        GenerationConfig {
            seed: Seed::Int(42),
            vendor_count: 500,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn vendors_onboard_before_window() {
        let cfg = config();
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let vendors = generate_vendors(&cfg, &mut rng);
        assert_eq!(vendors.len(), 500);
        let window_start = year_start(cfg.start_year);
        assert!(vendors.iter().all(|v| v.created_date < window_start));
    }

    #[test]
    fn gstin_requires_pan() {
        let cfg = config();
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let vendors = generate_vendors(&cfg, &mut rng);
        assert!(vendors
            .iter()
            .filter(|v| v.gstin.is_some())
            .all(|v| v.pan.is_some()));
    }

    #[test]
    fn plausibility_ratios_are_approximate_not_exact() {
        let cfg = config();
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let vendors = generate_vendors(&cfg, &mut rng);
        let with_pan = vendors.iter().filter(|v| v.pan.is_some()).count();
        // Bernoulli at 0.9 over 500: expect within a loose band, not exact.
        assert!((400..=490).contains(&with_pan), "with_pan = {}", with_pan);
    }

    #[test]
    fn vendor_ids_are_unique() {
        let cfg = config();
        let mut rng = SeedStream::from_seed(&cfg.seed);
        let vendors = generate_vendors(&cfg, &mut rng);
        let mut ids: Vec<&str> = vendors.iter().map(|v| v.vendor_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), vendors.len());
    }
}
