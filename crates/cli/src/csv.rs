//! Hand-rolled CSV output.
//!
//! One file per row set, RFC-4180 quoting: a field is quoted when it
//! contains a comma, quote, or newline, and embedded quotes are doubled.
//! Dates print as ISO calendar dates, amounts with two fraction digits,
//! absent optionals as empty fields.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use time::Date;

use grist_core::records::{
    Dataset, DocStatus, GrnStatus, LineCategory, PaymentMode, PoCategory, QuoteStatus,
    VendorStatus,
};
use grist_inject::TruthRecord;

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[String]) -> io::Result<()> {
    let line: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    writeln!(out, "{}", line.join(","))
}

fn date(d: Date) -> String {
    d.to_string()
}

fn opt_date(d: Option<Date>) -> String {
    d.map(|d| d.to_string()).unwrap_or_default()
}

fn opt_str(s: &Option<String>) -> String {
    s.clone().unwrap_or_default()
}

fn vendor_status(s: VendorStatus) -> &'static str {
    match s {
        VendorStatus::Active => "active",
        VendorStatus::Inactive => "inactive",
    }
}

fn doc_status(s: DocStatus) -> &'static str {
    match s {
        DocStatus::Draft => "draft",
        DocStatus::Submitted => "submitted",
        DocStatus::Approved => "approved",
        DocStatus::Completed => "completed",
        DocStatus::Cancelled => "cancelled",
    }
}

fn po_category(c: PoCategory) -> &'static str {
    match c {
        PoCategory::Goods => "goods",
        PoCategory::Services => "services",
    }
}

fn line_category(c: LineCategory) -> &'static str {
    match c {
        LineCategory::Goods => "goods",
        LineCategory::Services => "services",
        LineCategory::Capex => "capex",
        LineCategory::Other => "other",
    }
}

fn grn_status(s: GrnStatus) -> &'static str {
    match s {
        GrnStatus::Received => "received",
        GrnStatus::Accepted => "accepted",
        GrnStatus::Rejected => "rejected",
    }
}

fn payment_mode(m: PaymentMode) -> &'static str {
    match m {
        PaymentMode::Neft => "neft",
        PaymentMode::Rtgs => "rtgs",
        PaymentMode::Cheque => "cheque",
        PaymentMode::Wire => "wire",
    }
}

fn quote_status(s: QuoteStatus) -> &'static str {
    match s {
        QuoteStatus::Received => "received",
        QuoteStatus::Selected => "selected",
        QuoteStatus::Rejected => "rejected",
    }
}

fn open(dir: &Path, name: &str) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(dir.join(name))?))
}

/// Write every row set to `<dir>/<name>.csv`, file names matching the
/// dataset's row-count table.
pub fn write_dataset(dir: &Path, dataset: &Dataset) -> io::Result<()> {
    let mut out = open(dir, "vendors.csv")?;
    writeln!(out, "vendor_id,vendor_name,pan,gstin,bank_account,bank_ifsc,status,created_date,created_by,approved_by,approved_date,bank_verified,payment_terms_days")?;
    for v in &dataset.vendors {
        write_row(
            &mut out,
            &[
                v.vendor_id.clone(),
                v.vendor_name.clone(),
                opt_str(&v.pan),
                opt_str(&v.gstin),
                opt_str(&v.bank_account),
                opt_str(&v.bank_ifsc),
                vendor_status(v.status).to_string(),
                date(v.created_date),
                v.created_by.clone(),
                opt_str(&v.approved_by),
                opt_date(v.approved_date),
                v.bank_verified.to_string(),
                v.payment_terms_days.to_string(),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "pr_headers.csv")?;
    writeln!(
        out,
        "pr_id,requester,department,pr_date,status,approved_by,approved_date,total_amount"
    )?;
    for pr in &dataset.pr_headers {
        write_row(
            &mut out,
            &[
                pr.pr_id.clone(),
                pr.requester.clone(),
                pr.department.clone(),
                date(pr.pr_date),
                doc_status(pr.status).to_string(),
                opt_str(&pr.approved_by),
                opt_date(pr.approved_date),
                pr.total_amount.to_string(),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "pr_lines.csv")?;
    writeln!(
        out,
        "pr_line_id,pr_id,line_no,item_description,quantity,unit_price,line_amount,category,po_id"
    )?;
    for line in &dataset.pr_lines {
        write_row(
            &mut out,
            &[
                line.pr_line_id.clone(),
                line.pr_id.clone(),
                line.line_no.to_string(),
                line.item_description.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.line_amount.to_string(),
                line_category(line.category).to_string(),
                opt_str(&line.po_id),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "purchase_orders.csv")?;
    writeln!(out, "po_id,vendor_id,po_date,delivery_date,order_amount,tax_amount,total_amount,category,status,created_by,approved_by,approved_date,contract_id")?;
    for po in &dataset.purchase_orders {
        write_row(
            &mut out,
            &[
                po.po_id.clone(),
                po.vendor_id.clone(),
                date(po.po_date),
                date(po.delivery_date),
                po.order_amount.to_string(),
                po.tax_amount.to_string(),
                po.total_amount.to_string(),
                po_category(po.category).to_string(),
                doc_status(po.status).to_string(),
                po.created_by.clone(),
                opt_str(&po.approved_by),
                opt_date(po.approved_date),
                opt_str(&po.contract_id),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "grns.csv")?;
    writeln!(
        out,
        "grn_id,po_id,vendor_id,grn_date,qty_ordered,qty_received,amount,status,quality_passed,received_by"
    )?;
    for grn in &dataset.grns {
        write_row(
            &mut out,
            &[
                grn.grn_id.clone(),
                grn.po_id.clone(),
                grn.vendor_id.clone(),
                date(grn.grn_date),
                grn.qty_ordered.to_string(),
                grn.qty_received.to_string(),
                grn.amount.to_string(),
                grn_status(grn.status).to_string(),
                grn.quality_passed.to_string(),
                grn.received_by.clone(),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "invoices.csv")?;
    writeln!(out, "invoice_number,vendor_id,po_id,grn_id,invoice_date,due_date,invoice_amount,tax_amount,total_amount,status,approved_by,approved_date")?;
    for inv in &dataset.invoices {
        write_row(
            &mut out,
            &[
                inv.invoice_number.clone(),
                inv.vendor_id.clone(),
                opt_str(&inv.po_id),
                opt_str(&inv.grn_id),
                date(inv.invoice_date),
                opt_date(inv.due_date),
                inv.invoice_amount.to_string(),
                inv.tax_amount.to_string(),
                inv.total_amount.to_string(),
                doc_status(inv.status).to_string(),
                opt_str(&inv.approved_by),
                opt_date(inv.approved_date),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "payments.csv")?;
    writeln!(
        out,
        "payment_id,invoice_number,vendor_id,payment_date,amount,mode,status,approved_by,reference_no"
    )?;
    for pay in &dataset.payments {
        write_row(
            &mut out,
            &[
                pay.payment_id.clone(),
                pay.invoice_number.clone(),
                pay.vendor_id.clone(),
                date(pay.payment_date),
                pay.amount.to_string(),
                payment_mode(pay.mode).to_string(),
                doc_status(pay.status).to_string(),
                opt_str(&pay.approved_by),
                pay.reference_no.clone(),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "quotations.csv")?;
    writeln!(out, "quote_id,po_id,vendor_id,quote_date,amount,status")?;
    for q in &dataset.quotations {
        write_row(
            &mut out,
            &[
                q.quote_id.clone(),
                q.po_id.clone(),
                q.vendor_id.clone(),
                date(q.quote_date),
                q.amount.to_string(),
                quote_status(q.status).to_string(),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "contracts.csv")?;
    writeln!(
        out,
        "contract_id,vendor_id,start_date,end_date,contract_value,status"
    )?;
    for c in &dataset.contracts {
        write_row(
            &mut out,
            &[
                c.contract_id.clone(),
                c.vendor_id.clone(),
                date(c.start_date),
                date(c.end_date),
                c.contract_value.to_string(),
                doc_status(c.status).to_string(),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "role_assignments.csv")?;
    writeln!(
        out,
        "assignment_id,user_name,role,department,granted_date,active"
    )?;
    for r in &dataset.role_assignments {
        write_row(
            &mut out,
            &[
                r.assignment_id.clone(),
                r.user_name.clone(),
                r.role.clone(),
                r.department.clone(),
                date(r.granted_date),
                r.active.to_string(),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "workflow_logs.csv")?;
    writeln!(
        out,
        "log_id,entity_type,entity_id,step_no,action,actor,action_date"
    )?;
    for log in &dataset.workflow_logs {
        write_row(
            &mut out,
            &[
                log.log_id.clone(),
                log.entity_type.clone(),
                log.entity_id.clone(),
                log.step_no.to_string(),
                log.action.clone(),
                log.actor.clone(),
                date(log.action_date),
            ],
        )?;
    }
    out.flush()?;

    let mut out = open(dir, "change_logs.csv")?;
    writeln!(
        out,
        "change_id,entity_type,entity_id,field_name,old_value,new_value,changed_by,change_date"
    )?;
    for change in &dataset.change_logs {
        write_row(
            &mut out,
            &[
                change.change_id.clone(),
                change.entity_type.clone(),
                change.entity_id.clone(),
                change.field_name.clone(),
                change.old_value.clone(),
                change.new_value.clone(),
                change.changed_by.clone(),
                date(change.change_date),
            ],
        )?;
    }
    out.flush()
}

/// Write the labeled anomaly plan to `<dir>/anomaly_truth.csv`.
pub fn write_truth(dir: &Path, records: &[TruthRecord]) -> io::Result<()> {
    let mut out = open(dir, "anomaly_truth.csv")?;
    writeln!(out, "anomaly_id,test_step_id,test_step_name,process_area,anomaly_key,entity_type,entity_id,secondary_ids,planted_fields,summary,expected_flag,notes")?;
    for record in records {
        let secondary = serde_json::to_string(&record.secondary_ids).unwrap_or_default();
        write_row(
            &mut out,
            &[
                record.anomaly_id.clone(),
                record.test_step_id.clone(),
                record.test_step_name.clone(),
                record.process_area.clone(),
                record.anomaly_key.clone(),
                record.entity_type.clone(),
                record.entity_id.clone(),
                secondary,
                record.planted_fields.join(";"),
                record.summary.clone(),
                record.expected_flag.to_string(),
                record.notes.clone().unwrap_or_default(),
            ],
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping_quotes_commas_and_newlines() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn row_joins_with_commas() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["a".into(), "b,c".into(), "".into()]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,\"b,c\",\n");
    }
}
