//! Report roll-ups over reconciled rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{AcademicMonth, FeeReportSummary, PaymentStatus, ReconciledRow};

/// Summarises reconciled rows into counts and totals.
///
/// Every row is counted exactly once as paid or due, so the summary's
/// counts and amounts always add up, including for an empty list.
///
/// # Example
///
/// ```
/// use school_fee_engine::calculation::summarize;
///
/// let summary = summarize(&[]);
/// assert_eq!(summary.total_students, 0);
/// assert_eq!(summary.paid_count + summary.due_count, 0);
/// ```
pub fn summarize(rows: &[ReconciledRow]) -> FeeReportSummary {
    rows.iter()
        .fold(FeeReportSummary::default(), |mut summary, row| {
            tally(&mut summary, row);
            summary
        })
}

/// Summaries per month, keyed in academic order.
///
/// Months with no rows are absent from the map.
pub fn summarize_by_month(rows: &[ReconciledRow]) -> BTreeMap<AcademicMonth, FeeReportSummary> {
    rows.iter().fold(BTreeMap::new(), |mut by_month, row| {
        tally(by_month.entry(row.month).or_default(), row);
        by_month
    })
}

fn tally(summary: &mut FeeReportSummary, row: &ReconciledRow) {
    summary.total_students += 1;
    match row.status {
        PaymentStatus::Paid => {
            summary.paid_count += 1;
            summary.total_collected += row.all_total_amount;
        }
        PaymentStatus::Due => {
            summary.due_count += 1;
            summary.total_due += row.all_total_amount;
        }
    }
}

/// Optional criteria for narrowing a set of rows; `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowFilter {
    /// Only rows for this month.
    pub month: Option<AcademicMonth>,
    /// Only rows for this class (exact match).
    pub class_name: Option<String>,
    /// Only rows for this section (exact match).
    pub section: Option<String>,
}

impl RowFilter {
    /// True if `row` satisfies every criterion that is set.
    pub fn matches(&self, row: &ReconciledRow) -> bool {
        self.month.is_none_or(|m| m == row.month)
            && self
                .class_name
                .as_deref()
                .is_none_or(|c| c == row.class_name)
            && self.section.as_deref().is_none_or(|s| s == row.section)
    }
}

/// Rows matching `filter`, in their original order.
pub fn filter_rows<'a>(rows: &'a [ReconciledRow], filter: &RowFilter) -> Vec<&'a ReconciledRow> {
    rows.iter().filter(|row| filter.matches(row)).collect()
}
