//! Request types for the fee engine API.
//!
//! This module defines the JSON request bodies accepted by the API. Month
//! names arrive as plain strings and are parsed after deserialization so an
//! unknown month is reported as such rather than as a JSON error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::RowFilter;
use crate::error::EngineResult;
use crate::models::{AcademicMonth, FeeLineItemRecord, PaymentRecord, ReconciledRow, StudentFeeProfile};

/// Request body for `POST /fees/month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthFeeRequest {
    /// The student to price.
    pub profile: StudentFeeProfile,
    /// Month name, e.g. "June".
    pub month: String,
    /// Academic session; defaults to the configured current session.
    #[serde(default)]
    pub session: Option<String>,
    /// Reference date for the late-fee window; defaults to today.
    #[serde(default)]
    pub now: Option<NaiveDate>,
    /// Catalog to use instead of the configured schedule.
    #[serde(default)]
    pub catalog: Option<Vec<FeeLineItemRecord>>,
}

/// Request body for `POST /fees/total` and `POST /fees/payload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedMonthsRequest {
    /// The student to price.
    pub profile: StudentFeeProfile,
    /// Selected month names.
    pub months: Vec<String>,
    /// Academic session; defaults to the configured current session.
    #[serde(default)]
    pub session: Option<String>,
    /// Reference date for the late-fee window; defaults to today.
    #[serde(default)]
    pub now: Option<NaiveDate>,
    /// Catalog to use instead of the configured schedule.
    #[serde(default)]
    pub catalog: Option<Vec<FeeLineItemRecord>>,
}

/// Request body for `POST /payments/reconcile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    /// The student whose months are reconciled.
    pub profile: StudentFeeProfile,
    /// Payment records already persisted for the student.
    #[serde(default)]
    pub records: Vec<PaymentRecord>,
    /// Price due rows from the fee schedule instead of leaving them at zero.
    #[serde(default)]
    pub include_outstanding: bool,
    /// Academic session; defaults to the configured current session.
    #[serde(default)]
    pub session: Option<String>,
    /// Reference date for the late-fee window; defaults to today.
    #[serde(default)]
    pub now: Option<NaiveDate>,
}

/// Request body for `POST /reports/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// Reconciled rows to summarise.
    pub rows: Vec<ReconciledRow>,
    /// Optional narrowing applied before summarising.
    #[serde(default)]
    pub filter: RowFilter,
}

/// Parses a list of month names, failing on the first unknown one.
pub fn parse_months(names: &[String]) -> EngineResult<Vec<AcademicMonth>> {
    names.iter().map(|name| name.parse()).collect()
}
