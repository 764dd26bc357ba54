//! Labeled anomaly injection for generated procure-to-pay datasets.
//!
//! Injectors run in a fixed catalog order over a finished base dataset.
//! Each planted or flagged anomaly is logged to a truth record carrying
//! its taxonomy test step, the affected entity ids, and the mutated
//! fields, so downstream detection tooling can be scored against it.

pub mod manifest;
pub mod master_data;
pub mod pipeline;
pub mod process;
pub mod select;
pub mod taxonomy;
pub mod transactions;
pub mod truth;

use grist_core::config::GenerationConfig;
use grist_core::records::Dataset;
use grist_core::rng::SeedStream;

use taxonomy::TestStep;
use truth::{AnomalyTruthRecord, TruthLog};

pub use manifest::RunManifest;
pub use pipeline::{run_generation, GenerationRun};
pub use truth::AnomalyTruthRecord as TruthRecord;

/// Catalog order for injector dispatch. Configs are maps, so the order
/// the user wrote keys in must never influence the random stream.
pub const ANOMALY_ORDER: [&str; 17] = [
    "missing_tax_id_pct",
    "duplicate_vendor_pan_pct",
    "duplicate_bank_account_pct",
    "vendor_unapproved_pct",
    "unverified_bank_change_pct",
    "inactive_vendor_usage_pct",
    "vendor_compliance_pct",
    "pr_unapproved_pct",
    "duplicate_pr_pct",
    "po_split_threshold_pct",
    "delayed_receipt_pct",
    "partial_receipt_pct",
    "duplicate_invoice_number_pct",
    "invoice_without_grn_pct",
    "invoice_unapproved_pct",
    "payment_before_invoice_pct",
    "high_value_payment_pct",
];

#[derive(Debug, Clone)]
pub struct InjectionOutcome {
    pub dataset: Dataset,
    pub truth_records: Vec<AnomalyTruthRecord>,
    /// Keys requested in the config that resolved to no taxonomy step.
    pub skipped: Vec<String>,
}

/// Draw one taxonomy step for this injector invocation. Keys that map
/// to several candidate steps get a single seeded pick; the draw is
/// consumed even for a one-candidate key so the stream position does
/// not depend on catalog contents.
fn choose_step(key: &str, rng: &mut SeedStream) -> Option<&'static TestStep> {
    let candidates = taxonomy::steps_for(key);
    if candidates.is_empty() {
        return None;
    }
    let pick = rng.index(candidates.len());
    taxonomy::lookup(candidates[pick])
}

/// Apply every configured injector to the dataset, in catalog order.
///
/// Keys absent from the config, or configured at zero percent, are not
/// invoked at all and consume nothing from the stream. Keys that cannot
/// be resolved to a taxonomy step are reported in `skipped` rather than
/// failing the run.
pub fn inject(mut dataset: Dataset, config: &GenerationConfig, rng: &mut SeedStream) -> InjectionOutcome {
    let mut log = TruthLog::new();
    let mut skipped = Vec::new();

    for &key in ANOMALY_ORDER.iter() {
        let pct = match config.anomaly_pct(key) {
            Some(pct) if pct > 0.0 => pct,
            _ => continue,
        };
        let step = match choose_step(key, rng) {
            Some(step) => step,
            None => {
                skipped.push(key.to_string());
                continue;
            }
        };
        match key {
            "missing_tax_id_pct" => master_data::missing_tax_id(&mut dataset, pct, step, key, rng, &mut log),
            "duplicate_vendor_pan_pct" => master_data::duplicate_vendor_pan(&mut dataset, pct, step, key, rng, &mut log),
            "duplicate_bank_account_pct" => master_data::duplicate_bank_account(&mut dataset, pct, step, key, rng, &mut log),
            "vendor_unapproved_pct" => master_data::vendor_unapproved(&mut dataset, pct, step, key, rng, &mut log),
            "unverified_bank_change_pct" => master_data::unverified_bank_change(&mut dataset, pct, step, key, rng, &mut log),
            "inactive_vendor_usage_pct" => master_data::inactive_vendor_usage(&mut dataset, pct, step, key, rng, &mut log),
            "vendor_compliance_pct" => process::vendor_compliance(&mut dataset, pct, step, key, rng, &mut log),
            "pr_unapproved_pct" => process::pr_unapproved(&mut dataset, pct, step, key, config, rng, &mut log),
            "duplicate_pr_pct" => process::duplicate_pr(&mut dataset, pct, step, key, rng, &mut log),
            "po_split_threshold_pct" => process::po_split_threshold(&mut dataset, pct, step, key, config, rng, &mut log),
            "delayed_receipt_pct" => transactions::delayed_receipt(&mut dataset, pct, step, key, rng, &mut log),
            "partial_receipt_pct" => transactions::partial_receipt(&mut dataset, pct, step, key, rng, &mut log),
            "duplicate_invoice_number_pct" => transactions::duplicate_invoice_number(&mut dataset, pct, step, key, rng, &mut log),
            "invoice_without_grn_pct" => transactions::invoice_without_grn(&mut dataset, pct, step, key, rng, &mut log),
            "invoice_unapproved_pct" => process::invoice_unapproved(&mut dataset, pct, step, key, config, rng, &mut log),
            "payment_before_invoice_pct" => transactions::payment_before_invoice(&mut dataset, pct, step, key, rng, &mut log),
            "high_value_payment_pct" => process::high_value_payment(&mut dataset, pct, step, key, config, rng, &mut log),
            _ => skipped.push(key.to_string()),
        }
    }

    InjectionOutcome {
        dataset,
        truth_records: log.into_records(),
        skipped,
    }
}
