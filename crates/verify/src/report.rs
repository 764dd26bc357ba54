//! VerifyReport — aggregated output from the C1-C6 audit checks.
//!
//! Each check module produces a serializable result struct; the report
//! collects them and extracts notable findings for summary display.

use serde::Serialize;

use crate::c1_concentration::C1Result;
use crate::c2_goods_split::C2Result;
use crate::c3_arithmetic::C3Result;
use crate::c4_schedule::C4Result;
use crate::c5_referential::C5Result;
use crate::c6_date_order::C6Result;

/// Severity level for an audit finding.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum FindingSeverity {
    Info,
    Warning,
}

/// A notable finding from one check.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub check: String,
    pub severity: FindingSeverity,
    pub message: String,
    pub entity_id: Option<String>,
}

/// Aggregated audit report containing all C1-C6 results and findings.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub c1_concentration: Option<C1Result>,
    pub c2_goods_split: Option<C2Result>,
    pub c3_arithmetic: Option<C3Result>,
    pub c4_schedule: Option<C4Result>,
    pub c5_referential: Option<C5Result>,
    pub c6_date_order: Option<C6Result>,
    pub checks_run: Vec<String>,
    pub findings: Vec<Finding>,
}

impl VerifyReport {
    pub fn new() -> Self {
        VerifyReport {
            c1_concentration: None,
            c2_goods_split: None,
            c3_arithmetic: None,
            c4_schedule: None,
            c5_referential: None,
            c6_date_order: None,
            checks_run: Vec::new(),
            findings: Vec::new(),
        }
    }

    /// Sum of violation counts across all populated checks.
    pub fn total_violations(&self) -> usize {
        let mut total = 0;
        if let Some(ref c1) = self.c1_concentration {
            total += c1.violations;
        }
        if let Some(ref c2) = self.c2_goods_split {
            total += c2.violations;
        }
        if let Some(ref c3) = self.c3_arithmetic {
            total += c3.violations;
        }
        if let Some(ref c4) = self.c4_schedule {
            total += c4.violations;
        }
        if let Some(ref c5) = self.c5_referential {
            total += c5.violations;
        }
        if let Some(ref c6) = self.c6_date_order {
            total += c6.violations;
        }
        total
    }

    pub fn has_warnings(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == FindingSeverity::Warning)
    }

    /// Extract findings from populated check results. One Warning per
    /// check with violations, carrying the first-instance message; one
    /// Info line for the measured concentration share.
    pub fn extract_findings(&mut self) {
        self.findings.clear();

        if let Some(ref c1) = self.c1_concentration {
            self.findings.push(Finding {
                check: "c1".to_string(),
                severity: FindingSeverity::Info,
                message: format!(
                    "top {} vendors hold {:.1}% of purchase orders (target {:.1}%)",
                    c1.top_cohort_size,
                    c1.actual_share * 100.0,
                    c1.target_share * 100.0
                ),
                entity_id: None,
            });
            if c1.violations > 0 {
                self.findings.push(Finding {
                    check: "c1".to_string(),
                    severity: FindingSeverity::Warning,
                    message: c1.summary.clone(),
                    entity_id: None,
                });
            }
        }

        let categories: [(&str, usize, &Option<String>, &str); 5] = [
            (
                "c2",
                self.c2_goods_split.as_ref().map_or(0, |c| c.violations),
                self.c2_goods_split
                    .as_ref()
                    .map_or(&None, |c| &c.first_instance),
                "service purchase orders carry goods receipts",
            ),
            (
                "c3",
                self.c3_arithmetic.as_ref().map_or(0, |c| c.violations),
                self.c3_arithmetic
                    .as_ref()
                    .map_or(&None, |c| &c.first_instance),
                "invoice totals disagree with amount + tax",
            ),
            (
                "c4",
                self.c4_schedule.as_ref().map_or(0, |c| c.violations),
                self.c4_schedule
                    .as_ref()
                    .map_or(&None, |c| &c.first_instance),
                "payment schedule violations",
            ),
            (
                "c5",
                self.c5_referential.as_ref().map_or(0, |c| c.violations),
                self.c5_referential
                    .as_ref()
                    .map_or(&None, |c| &c.first_instance),
                "unresolved foreign key references",
            ),
            (
                "c6",
                self.c6_date_order.as_ref().map_or(0, |c| c.violations),
                self.c6_date_order
                    .as_ref()
                    .map_or(&None, |c| &c.first_instance),
                "document dates out of process order",
            ),
        ];
        for (check, violations, first, label) in categories {
            if violations == 0 {
                continue;
            }
            let detail = first.clone().unwrap_or_else(|| label.to_string());
            self.findings.push(Finding {
                check: check.to_string(),
                severity: FindingSeverity::Warning,
                message: format!("{} ({} total)", detail, violations),
                entity_id: None,
            });
        }
    }
}

impl Default for VerifyReport {
    fn default() -> Self {
        Self::new()
    }
}
