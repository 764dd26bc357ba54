//! Read-only audit suite for generated procure-to-pay datasets.
//!
//! Each check is a separate module producing a serializable result
//! struct; `verify()` orchestrates all checks and aggregates them into
//! a `VerifyReport`. Checks diagnose, never correct: a report in hand
//! leaves the dataset untouched.

pub mod c1_concentration;
pub mod c2_goods_split;
pub mod c3_arithmetic;
pub mod c4_schedule;
pub mod c5_referential;
pub mod c6_date_order;
pub mod report;

use grist_core::config::GenerationConfig;
use grist_core::records::Dataset;

pub use c1_concentration::C1Result;
pub use c2_goods_split::C2Result;
pub use c3_arithmetic::C3Result;
pub use c4_schedule::C4Result;
pub use c5_referential::C5Result;
pub use c6_date_order::C6Result;
pub use report::{Finding, FindingSeverity, VerifyReport};

/// Run the full C1-C6 audit suite on a dataset.
pub fn verify(dataset: &Dataset, config: &GenerationConfig) -> VerifyReport {
    let mut report = VerifyReport::new();
    report.c1_concentration = Some(c1_concentration::check_concentration(dataset, config));
    report.c2_goods_split = Some(c2_goods_split::check_goods_split(dataset));
    report.c3_arithmetic = Some(c3_arithmetic::check_arithmetic(dataset));
    report.c4_schedule = Some(c4_schedule::check_schedule(dataset));
    report.c5_referential = Some(c5_referential::check_referential(dataset));
    report.c6_date_order = Some(c6_date_order::check_date_order(dataset));
    report.checks_run = vec![
        "c1".to_string(),
        "c2".to_string(),
        "c3".to_string(),
        "c4".to_string(),
        "c5".to_string(),
        "c6".to_string(),
    ];
    report.extract_findings();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use grist_core::config::Seed;
    use grist_core::rng::SeedStream;

    fn generated() -> (Dataset, GenerationConfig) {
        let config = GenerationConfig {
            seed: Seed::Int(9),
            vendor_count: 50,
            po_count: 200,
            ..GenerationConfig::default()
        };
        let mut rng = SeedStream::from_seed(&config.seed);
        let dataset = grist_core::synthesize(&config, &mut rng).unwrap();
        (dataset, config)
    }

    #[test]
    fn normalized_dataset_is_clean() {
        let (dataset, config) = generated();
        let report = verify(&dataset, &config);
        assert_eq!(report.total_violations(), 0, "{:?}", report.findings);
        assert!(!report.has_warnings());
        assert_eq!(report.checks_run.len(), 6);
    }

    #[test]
    fn broken_invoice_total_is_caught() {
        let (mut dataset, config) = generated();
        let invoice = &mut dataset.invoices[0];
        invoice.total_amount += rust_decimal::Decimal::ONE;
        let report = verify(&dataset, &config);
        let c3 = report.c3_arithmetic.unwrap();
        assert_eq!(c3.violations, 1);
        assert!(c3.first_instance.unwrap().contains(&dataset.invoices[0].invoice_number));
    }

    #[test]
    fn dangling_reference_is_caught() {
        let (mut dataset, config) = generated();
        dataset.grns[0].po_id = "PO-2023-99999".to_string();
        let report = verify(&dataset, &config);
        let c5 = report.c5_referential.as_ref().unwrap();
        assert_eq!(c5.dangling_grn_po, 1);
        assert!(report.has_warnings());
    }
}
