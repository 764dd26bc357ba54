//! Purchase requisition synthesis.
//!
//! Requisitions are derived backwards from the full PO list once all
//! chunks have run: most POs get a converted requisition dated a few days
//! before the order, whose last line carries the PO link; a small tail of
//! standalone requisitions is never converted. Header totals are the sum
//! of line amounts.

use rust_decimal::Decimal;

use crate::config::GenerationConfig;
use crate::dates::add_days;
use crate::gen::money_between;
use crate::ids::{format_id, format_line_id, SequenceCounter, PR_PREFIX};
use crate::names;
use crate::records::{round2, DocStatus, LineCategory, PrHeader, PrLine, PurchaseOrder};
use crate::rng::SeedStream;

const CONVERTED_RATIO: f64 = 0.90;
const STANDALONE_RATIO: f64 = 0.05;
const APPROVED_RATIO: f64 = 0.92;

const LINE_CATEGORIES: &[LineCategory] = &[
    LineCategory::Goods,
    LineCategory::Services,
    LineCategory::Capex,
    LineCategory::Other,
];

fn make_lines(
    pr_id: &str,
    year: i32,
    seq: u64,
    line_count: usize,
    po_id: Option<&str>,
    rng: &mut SeedStream,
) -> (Vec<PrLine>, Decimal) {
    let mut lines = Vec::with_capacity(line_count);
    let mut total = Decimal::ZERO;
    for line_no in 1..=line_count as u32 {
        let quantity = rng.range_i64(1, 100);
        let unit_price = money_between(rng, 50, 5_000);
        let line_amount = round2(unit_price * Decimal::from(quantity));
        total += line_amount;
        // Only the last line of a converted requisition carries the link.
        let line_po = if line_no == line_count as u32 {
            po_id.map(str::to_owned)
        } else {
            None
        };
        lines.push(PrLine {
            pr_line_id: format_line_id(PR_PREFIX, year, seq, line_no),
            pr_id: pr_id.to_string(),
            line_no,
            item_description: names::item_description(rng),
            quantity,
            unit_price,
            line_amount,
            category: *rng.pick(LINE_CATEGORIES),
            po_id: line_po,
        });
    }
    (lines, round2(total))
}

pub fn generate_requisitions(
    _config: &GenerationConfig,
    orders: &[PurchaseOrder],
    rng: &mut SeedStream,
) -> (Vec<PrHeader>, Vec<PrLine>) {
    let mut seq = SequenceCounter::new();
    let mut headers = Vec::new();
    let mut lines = Vec::new();

    for po in orders {
        let converted = rng.chance(CONVERTED_RATIO);
        let standalone = !converted && rng.chance(STANDALONE_RATIO / (1.0 - CONVERTED_RATIO));
        if !converted && !standalone {
            continue;
        }
        let pr_date = add_days(po.po_date, -rng.range_i64(1, 10));
        let year = pr_date.year();
        let n = seq.next(year);
        let pr_id = format_id(PR_PREFIX, year, n);
        let line_count = rng.index(3) + 1;
        let po_link = converted.then_some(po.po_id.as_str());
        let (pr_lines, total_amount) = make_lines(&pr_id, year, n, line_count, po_link, rng);

        let (status, approved_by, approved_date) = if rng.chance(APPROVED_RATIO) {
            (
                DocStatus::Approved,
                Some(names::person_name(rng)),
                Some(add_days(pr_date, rng.range_i64(0, 4))),
            )
        } else {
            (DocStatus::Submitted, None, None)
        };

        headers.push(PrHeader {
            pr_id,
            requester: names::person_name(rng),
            department: names::department(rng),
            pr_date,
            status,
            approved_by,
            approved_date,
            total_amount,
        });
        lines.extend(pr_lines);
    }

    (headers, lines)
}
