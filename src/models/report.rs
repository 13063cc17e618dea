//! Reconciled report rows and summaries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AcademicMonth, FeeKind, MonthlyBreakdown, PaymentStatus};

/// One student-month after merging payment state with identity fields.
///
/// Due rows are never absent: a month with no payment record becomes a row
/// with status [`PaymentStatus::Due`] and zero amounts, so reports need no
/// null handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledRow {
    /// Student identifier.
    pub student_id: String,
    /// Student name.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub name: String,
    /// Roll number.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub roll_number: String,
    /// Class.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub class_name: String,
    /// Section.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub section: String,
    /// Month the row describes.
    pub month: AcademicMonth,
    /// Paid or due.
    pub status: PaymentStatus,
    /// Fees excluding transport and late fee.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub total_amount: Decimal,
    /// Transport charge.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub transport_amount: Decimal,
    /// Late-fee surcharge.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub late_amount: Decimal,
    /// Grand total, always recomputed from the three parts above.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub all_total_amount: Decimal,
    /// Per-kind amounts excluding transport and late fee.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::fee_amounts")]
    pub fee_amounts: BTreeMap<FeeKind, Decimal>,
}

impl ReconciledRow {
    /// Fills a due row's amounts from a computed breakdown.
    ///
    /// Paid rows keep the amounts that were actually paid and are returned
    /// unchanged.
    pub fn with_outstanding(mut self, breakdown: &MonthlyBreakdown) -> Self {
        if self.status == PaymentStatus::Paid {
            return self;
        }
        self.fee_amounts = breakdown.fee_amounts();
        self.total_amount = breakdown.fees_total();
        self.transport_amount = breakdown.transport_amount();
        self.late_amount = breakdown.late_amount();
        self.all_total_amount = self.total_amount + self.transport_amount + self.late_amount;
        self
    }
}

/// Roll-up of many reconciled rows.
///
/// `paid_count + due_count == total_students` and
/// `total_collected + total_due` equals the sum of every row's grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeReportSummary {
    /// Number of rows summarised.
    pub total_students: usize,
    /// Rows with status `Paid`.
    pub paid_count: usize,
    /// Rows with status `Due`.
    pub due_count: usize,
    /// Sum of grand totals over paid rows.
    pub total_collected: Decimal,
    /// Sum of grand totals over due rows.
    pub total_due: Decimal,
}
