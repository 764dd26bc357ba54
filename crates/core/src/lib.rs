//! Grist synthesis core -- deterministic P2P dataset generation.
//!
//! The core consumes a validated `GenerationConfig` plus one owned
//! `SeedStream` and produces a cross-referentially consistent `Dataset`
//! in a fixed dependency order: vendors, then chunked
//! PO/GRN/invoice/payment slices, then requisitions and sourcing
//! documents, then workflow/change logs, then the constraint pass.
//! Anomaly injection lives in `grist-inject` and runs on the returned
//! dataset with the same stream.

pub mod chunk;
pub mod config;
pub mod constrain;
pub mod dates;
pub mod error;
pub mod gen;
pub mod ids;
pub mod names;
pub mod records;
pub mod rng;

pub use config::{GenerationConfig, Seed};
pub use error::GenError;
pub use records::Dataset;
pub use rng::SeedStream;

/// Generate base entities without the constraint pass. Exposed for the
/// validator's tests, which need a pre-normalization dataset.
pub fn generate_base(config: &GenerationConfig, rng: &mut SeedStream) -> Result<Dataset, GenError> {
    let mut dataset = Dataset {
        vendors: gen::vendor::generate_vendors(config, rng),
        ..Dataset::default()
    };

    let mut state = chunk::SequenceState::new();
    for len in chunk::chunk_sizes(config.po_count, config.chunk_size) {
        let out = chunk::generate_chunk(config, &dataset.vendors, len, &mut state, rng)?;
        dataset.purchase_orders.extend(out.purchase_orders);
        dataset.grns.extend(out.grns);
        dataset.invoices.extend(out.invoices);
        dataset.payments.extend(out.payments);
    }

    let (pr_headers, pr_lines) =
        gen::requisition::generate_requisitions(config, &dataset.purchase_orders, rng);
    dataset.pr_headers = pr_headers;
    dataset.pr_lines = pr_lines;

    let sourcing = gen::sourcing::generate_sourcing(
        config,
        &dataset.vendors,
        &mut dataset.purchase_orders,
        rng,
    );
    dataset.quotations = sourcing.quotations;
    dataset.contracts = sourcing.contracts;
    dataset.role_assignments = sourcing.role_assignments;

    dataset.workflow_logs =
        gen::logs::generate_workflow_logs(&dataset.purchase_orders, &dataset.invoices, rng);
    dataset.change_logs =
        gen::logs::generate_change_logs(&dataset.vendors, &dataset.purchase_orders, rng);

    Ok(dataset)
}

/// Synthesize the full dataset: base generation plus the constraint /
/// normalization pass. Validates the config before any work begins.
pub fn synthesize(config: &GenerationConfig, rng: &mut SeedStream) -> Result<Dataset, GenError> {
    config.validate()?;
    let mut dataset = generate_base(config, rng)?;
    constrain::apply(&mut dataset, config, rng);
    Ok(dataset)
}
