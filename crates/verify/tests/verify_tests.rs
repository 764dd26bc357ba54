use grist_core::config::{GenerationConfig, Seed};
use grist_core::records::{Dataset, PoCategory};
use grist_core::rng::SeedStream;
use grist_verify::{verify, FindingSeverity};

fn generated(seed: i64) -> (Dataset, GenerationConfig) {
    let config = GenerationConfig {
        seed: Seed::Int(seed),
        vendor_count: 60,
        po_count: 250,
        ..GenerationConfig::default()
    };
    let mut rng = SeedStream::from_seed(&config.seed);
    let dataset = grist_core::synthesize(&config, &mut rng).unwrap();
    (dataset, config)
}

#[test]
fn report_is_all_clear_on_normalized_output() {
    let (dataset, config) = generated(101);
    let report = verify(&dataset, &config);
    assert_eq!(report.total_violations(), 0, "{:?}", report.findings);
    // Only the informational concentration line remains.
    assert!(report
        .findings
        .iter()
        .all(|f| f.severity == FindingSeverity::Info));
}

#[test]
fn service_order_with_receipt_trips_goods_split() {
    let (mut dataset, config) = generated(102);
    let receipted_po = dataset.grns[0].po_id.clone();
    let po = dataset
        .purchase_orders
        .iter_mut()
        .find(|po| po.po_id == receipted_po)
        .unwrap();
    po.category = PoCategory::Services;
    let report = verify(&dataset, &config);
    assert_eq!(report.c2_goods_split.unwrap().violations, 1);
}

#[test]
fn early_payment_trips_schedule_and_date_order() {
    let (mut dataset, config) = generated(103);
    let invoice_number = dataset.payments[0].invoice_number.clone();
    let invoice_date = dataset
        .invoices
        .iter()
        .find(|inv| inv.invoice_number == invoice_number)
        .unwrap()
        .invoice_date;
    dataset.payments[0].payment_date = invoice_date.previous_day().unwrap();
    let report = verify(&dataset, &config);
    assert_eq!(report.c4_schedule.as_ref().unwrap().early_payments, 1);
    assert_eq!(
        report.c6_date_order.as_ref().unwrap().payment_before_invoice,
        1
    );
}

#[test]
fn verification_never_mutates_the_dataset() {
    let (dataset, config) = generated(104);
    let before = dataset.clone();
    let _ = verify(&dataset, &config);
    assert_eq!(dataset, before);
}
