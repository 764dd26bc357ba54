//! Workflow and change-log synthesis.
//!
//! Workflow logs form an append-only ordered sequence per parent
//! document, always starting with a "created" entry; approval entries
//! appear only for documents that carry approval metadata. Change logs
//! cover vendor bank edits and PO amount revisions.

use rust_decimal::Decimal;
use time::Date;

use crate::dates::add_days;
use crate::ids::{format_id, SequenceCounter, CHANGE_PREFIX, WORKFLOW_PREFIX};
use crate::names;
use crate::records::{round2, ChangeLog, Invoice, PurchaseOrder, Vendor, WorkflowLog};
use crate::rng::SeedStream;

const VENDOR_BANK_CHANGE_RATIO: f64 = 0.10;
const PO_AMOUNT_REVISION_RATIO: f64 = 0.08;

struct WorkflowSink<'a> {
    seq: SequenceCounter,
    logs: &'a mut Vec<WorkflowLog>,
}

impl WorkflowSink<'_> {
    fn push(&mut self, entity_type: &str, entity_id: &str, step_no: u32, action: &str, actor: String, date: Date) {
        let log_id = format_id(WORKFLOW_PREFIX, date.year(), self.seq.next(date.year()));
        self.logs.push(WorkflowLog {
            log_id,
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            step_no,
            action: action.to_string(),
            actor,
            action_date: date,
        });
    }
}

pub fn generate_workflow_logs(
    orders: &[PurchaseOrder],
    invoices: &[Invoice],
    rng: &mut SeedStream,
) -> Vec<WorkflowLog> {
    let mut logs = Vec::new();
    let mut sink = WorkflowSink {
        seq: SequenceCounter::new(),
        logs: &mut logs,
    };

    for po in orders {
        sink.push("purchase_order", &po.po_id, 1, "created", po.created_by.clone(), po.po_date);
        // Submission is logged on the order date; approval dates are
        // drawn at 0-5 days out, so this keeps the sequence monotonic.
        sink.push(
            "purchase_order",
            &po.po_id,
            2,
            "submitted",
            po.created_by.clone(),
            po.po_date,
        );
        if let (Some(approver), Some(date)) = (&po.approved_by, po.approved_date) {
            sink.push("purchase_order", &po.po_id, 3, "approved", approver.clone(), date);
        }
    }
    for invoice in invoices {
        let clerk = names::person_name(rng);
        sink.push(
            "invoice",
            &invoice.invoice_number,
            1,
            "created",
            clerk.clone(),
            invoice.invoice_date,
        );
        if let (Some(approver), Some(date)) = (&invoice.approved_by, invoice.approved_date) {
            sink.push("invoice", &invoice.invoice_number, 2, "approved", approver.clone(), date);
        }
    }

    logs
}

pub fn generate_change_logs(
    vendors: &[Vendor],
    orders: &[PurchaseOrder],
    rng: &mut SeedStream,
) -> Vec<ChangeLog> {
    let mut seq = SequenceCounter::new();
    let mut changes = Vec::new();

    for vendor in vendors {
        let Some(account) = &vendor.bank_account else {
            continue;
        };
        if !rng.chance(VENDOR_BANK_CHANGE_RATIO) {
            continue;
        }
        let change_date = add_days(vendor.created_date, rng.range_i64(30, 200));
        let old_account = names::bank_account(rng);
        changes.push(ChangeLog {
            change_id: format_id(CHANGE_PREFIX, change_date.year(), seq.next(change_date.year())),
            entity_type: "vendor".to_string(),
            entity_id: vendor.vendor_id.clone(),
            field_name: "bank_account".to_string(),
            old_value: old_account,
            new_value: account.clone(),
            changed_by: names::person_name(rng),
            change_date,
        });
    }

    for po in orders {
        if !rng.chance(PO_AMOUNT_REVISION_RATIO) {
            continue;
        }
        let change_date = add_days(po.po_date, rng.range_i64(1, 15));
        // The prior amount is recorded 5% below the current one.
        let old_amount = round2(po.order_amount * Decimal::new(95, 2));
        changes.push(ChangeLog {
            change_id: format_id(CHANGE_PREFIX, change_date.year(), seq.next(change_date.year())),
            entity_type: "purchase_order".to_string(),
            entity_id: po.po_id.clone(),
            field_name: "order_amount".to_string(),
            old_value: old_amount.to_string(),
            new_value: po.order_amount.to_string(),
            changed_by: names::person_name(rng),
            change_date,
        });
    }

    changes
}
