//! Calculation logic for the school fee engine.
//!
//! This module contains the pure fee computations: the academic calendar,
//! fee schedule lookup by class/session/month, the late-fee window, monthly
//! fee aggregation and submission payloads, paid/due reconciliation, and
//! report roll-ups. None of it performs I/O or keeps state between calls.

mod academic_calendar;
mod fee_schedule;
mod late_fee;
mod monthly_fee;
mod reconciliation;
mod report;

pub use academic_calendar::{
    SESSION_START_INDEX, academic_months, calendar_month_index, month_index, session_start_index,
};
pub use fee_schedule::{FeeCatalog, FeeScheduleIndex, fee_items_for_month};
pub use late_fee::{
    LATE_FEE_RULE_ID, LATE_FEE_SESSION_START_INDEX, LateFeeEvaluation, evaluate_late_fee,
    is_late_fee_applicable,
};
pub use monthly_fee::{
    DYNAMIC_TRANSPORT_RULE_ID, STATIC_FEE_RULE_ID, build_submission_payload, compute_month,
    compute_total_for_months,
};
pub use reconciliation::{MonthPartition, merge_student_record, partition_months, reconcile_student};
pub use report::{RowFilter, filter_rows, summarize, summarize_by_month};
