//! P2P entity records.
//!
//! Records are created once by the generators and mutated afterwards only
//! by the constraint pass and the anomaly injector. Optional business
//! fields are explicit `Option`s, never sentinel strings; amounts are
//! `Decimal` rounded to 2 fraction digits; dates are calendar dates.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::Date;

/// Round a monetary amount to 2 fraction digits, banker's rounding.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStatus {
    Draft,
    Submitted,
    Approved,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoCategory {
    Goods,
    Services,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    Goods,
    Services,
    Capex,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrnStatus {
    Received,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Neft,
    Rtgs,
    Cheque,
    Wire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Received,
    Selected,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub vendor_id: String,
    pub vendor_name: String,
    pub pan: Option<String>,
    pub gstin: Option<String>,
    pub bank_account: Option<String>,
    pub bank_ifsc: Option<String>,
    pub status: VendorStatus,
    pub created_date: Date,
    pub created_by: String,
    pub approved_by: Option<String>,
    pub approved_date: Option<Date>,
    pub bank_verified: bool,
    pub payment_terms_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrHeader {
    pub pr_id: String,
    pub requester: String,
    pub department: String,
    pub pr_date: Date,
    pub status: DocStatus,
    pub approved_by: Option<String>,
    pub approved_date: Option<Date>,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrLine {
    pub pr_line_id: String,
    pub pr_id: String,
    pub line_no: u32,
    pub item_description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_amount: Decimal,
    pub category: LineCategory,
    /// The last line of a converted requisition carries the PO link.
    pub po_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub po_id: String,
    pub vendor_id: String,
    pub po_date: Date,
    pub delivery_date: Date,
    pub order_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub category: PoCategory,
    pub status: DocStatus,
    pub created_by: String,
    pub approved_by: Option<String>,
    pub approved_date: Option<Date>,
    pub contract_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grn {
    pub grn_id: String,
    pub po_id: String,
    pub vendor_id: String,
    pub grn_date: Date,
    pub qty_ordered: i64,
    pub qty_received: i64,
    pub amount: Decimal,
    pub status: GrnStatus,
    pub quality_passed: bool,
    pub received_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Vendor-facing invoice number, the primary key of this row set.
    /// Duplicate numbers are a planted anomaly, so no uniqueness is
    /// enforced here.
    pub invoice_number: String,
    pub vendor_id: String,
    pub po_id: Option<String>,
    pub grn_id: Option<String>,
    pub invoice_date: Date,
    pub due_date: Option<Date>,
    pub invoice_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub status: DocStatus,
    pub approved_by: Option<String>,
    pub approved_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: String,
    pub invoice_number: String,
    pub vendor_id: String,
    pub payment_date: Date,
    pub amount: Decimal,
    pub mode: PaymentMode,
    pub status: DocStatus,
    pub approved_by: Option<String>,
    pub reference_no: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub quote_id: String,
    pub po_id: String,
    pub vendor_id: String,
    pub quote_date: Date,
    pub amount: Decimal,
    pub status: QuoteStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: String,
    pub vendor_id: String,
    pub start_date: Date,
    pub end_date: Date,
    pub contract_value: Decimal,
    pub status: DocStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub assignment_id: String,
    pub user_name: String,
    pub role: String,
    pub department: String,
    pub granted_date: Date,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowLog {
    pub log_id: String,
    pub entity_type: String,
    pub entity_id: String,
    /// 1-based position in the parent's append-only sequence; step 1 is
    /// always the "created" entry.
    pub step_no: u32,
    pub action: String,
    pub actor: String,
    pub action_date: Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLog {
    pub change_id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
    pub changed_by: String,
    pub change_date: Date,
}

/// The full generated row sets, one Vec per output file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub vendors: Vec<Vendor>,
    pub pr_headers: Vec<PrHeader>,
    pub pr_lines: Vec<PrLine>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub grns: Vec<Grn>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub quotations: Vec<Quotation>,
    pub contracts: Vec<Contract>,
    pub role_assignments: Vec<RoleAssignment>,
    pub workflow_logs: Vec<WorkflowLog>,
    pub change_logs: Vec<ChangeLog>,
}

impl Dataset {
    /// Row counts per output file, in file order.
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("vendors", self.vendors.len()),
            ("pr_headers", self.pr_headers.len()),
            ("pr_lines", self.pr_lines.len()),
            ("purchase_orders", self.purchase_orders.len()),
            ("grns", self.grns.len()),
            ("invoices", self.invoices.len()),
            ("payments", self.payments.len()),
            ("quotations", self.quotations.len()),
            ("contracts", self.contracts.len()),
            ("role_assignments", self.role_assignments.len()),
            ("workflow_logs", self.workflow_logs.len()),
            ("change_logs", self.change_logs.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_uses_bankers_rounding() {
        assert_eq!(round2(Decimal::new(12345, 3)), Decimal::new(1234, 2)); // 12.345 -> 12.34
        assert_eq!(round2(Decimal::new(12355, 3)), Decimal::new(1236, 2)); // 12.355 -> 12.36
    }
}
