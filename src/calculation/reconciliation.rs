//! Payment reconciliation.
//!
//! Splits the academic months into paid and due using the payment records
//! that exist, and turns each student-month into a [`ReconciledRow`]. A month
//! is paid if and only if a record exists for it; there are no partial
//! payments and no way back from paid to due.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{AcademicMonth, PaymentRecord, PaymentStatus, ReconciledRow, StudentFeeProfile};

/// Months split by payment state, each in calendar order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPartition {
    /// Months with a payment record.
    pub paid_months: Vec<AcademicMonth>,
    /// Months without one.
    pub due_months: Vec<AcademicMonth>,
}

/// Partitions `all_months` into paid and due months.
///
/// Output order follows `all_months`, never the order records arrived in.
/// Several records for one month still yield a single paid entry, and
/// records for months outside `all_months` are ignored, so the two lists
/// are always disjoint and together cover `all_months`.
///
/// # Example
///
/// ```
/// use school_fee_engine::calculation::{academic_months, partition_months};
///
/// let partition = partition_months(&academic_months(), &[]);
/// assert!(partition.paid_months.is_empty());
/// assert_eq!(partition.due_months.len(), 12);
/// ```
pub fn partition_months(all_months: &[AcademicMonth], records: &[PaymentRecord]) -> MonthPartition {
    let recorded: HashSet<AcademicMonth> = records.iter().map(|r| r.month).collect();
    let mut seen: HashSet<AcademicMonth> = HashSet::new();
    let mut partition = MonthPartition::default();

    for &month in all_months {
        if !seen.insert(month) {
            continue;
        }
        if recorded.contains(&month) {
            partition.paid_months.push(month);
        } else {
            partition.due_months.push(month);
        }
    }

    partition
}

/// Merges a student's identity with the payment record for one month.
///
/// Without a record the row is due with zero amounts. With one, the grand
/// total is recomputed from the record's parts; a stored total that
/// disagrees is logged and ignored.
pub fn merge_student_record(
    profile: &StudentFeeProfile,
    month: AcademicMonth,
    record: Option<&PaymentRecord>,
) -> ReconciledRow {
    let mut row = ReconciledRow {
        student_id: profile.id.clone(),
        name: profile.name.clone(),
        roll_number: profile.roll_number.clone(),
        class_name: profile.class_name.clone(),
        section: profile.section.clone(),
        month,
        status: PaymentStatus::Due,
        total_amount: Default::default(),
        transport_amount: Default::default(),
        late_amount: Default::default(),
        all_total_amount: Default::default(),
        fee_amounts: Default::default(),
    };

    let Some(record) = record else {
        return row;
    };

    if let Err(err) = record.verify_total() {
        warn!(student_id = %profile.id, month = %month, error = %err, "Payment record total mismatch");
    }

    row.status = PaymentStatus::Paid;
    row.total_amount = record.total_amount;
    row.transport_amount = record.transport_amount;
    row.late_amount = record.late_amount;
    row.all_total_amount = record.recomputed_total();
    row.fee_amounts = record.fee_amounts.clone();
    row
}

/// Builds one reconciled row per month in `all_months` for a student.
///
/// When several records exist for the same month, the first one wins.
pub fn reconcile_student(
    profile: &StudentFeeProfile,
    all_months: &[AcademicMonth],
    records: &[PaymentRecord],
) -> Vec<ReconciledRow> {
    let mut seen: HashSet<AcademicMonth> = HashSet::new();
    all_months
        .iter()
        .copied()
        .filter(|month| seen.insert(*month))
        .map(|month| {
            let record = records.iter().find(|r| r.month == month);
            merge_student_record(profile, month, record)
        })
        .collect()
}
