//! Payment records and submission drafts.
//!
//! A [`PaymentRecord`] is persisted by the external payment system once a
//! month has been paid; the absence of a record means the month is due. A
//! [`PaymentDraft`] is what the engine hands to that system for submission.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AcademicMonth, FeeKind};
use crate::error::{EngineError, EngineResult};

/// Paid/due state of one student-month.
///
/// The only transition is `Due -> Paid`, made by [`PaymentDraft::confirm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// A payment record exists for the month.
    #[default]
    Paid,
    /// No payment record exists for the month.
    #[serde(rename = "Unpaid", alias = "Due")]
    Due,
}

/// One persisted payment for a single student and month.
///
/// Numeric fields default to zero and `feeAmounts` to empty when absent or
/// `null`; `feeAmounts` entries for unknown fee labels are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Student the payment belongs to.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub student_id: String,
    /// Class at the time of payment.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub class_name: String,
    /// Section at the time of payment.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub section: String,
    /// Academic session.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub session: String,
    /// The month this payment covers.
    pub month: AcademicMonth,
    /// Always `Paid` for persisted records.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub status: PaymentStatus,
    /// Sum of `fee_amounts`.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub total_amount: Decimal,
    /// Transport charge for the month.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub transport_amount: Decimal,
    /// Late-fee surcharge for the month.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub late_amount: Decimal,
    /// Stored grand total; see [`PaymentRecord::recomputed_total`].
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub all_total_amount: Decimal,
    /// Per-kind amounts excluding transport and late fee.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::fee_amounts")]
    pub fee_amounts: BTreeMap<FeeKind, Decimal>,
    /// Date the payment was accepted, if known.
    #[serde(default)]
    pub paid_on: Option<NaiveDate>,
}

impl PaymentRecord {
    /// The grand total recomputed from its three components.
    pub fn recomputed_total(&self) -> Decimal {
        self.total_amount + self.transport_amount + self.late_amount
    }

    /// Checks the stored `all_total_amount` against its components.
    ///
    /// Returns the recomputed total when they agree.
    pub fn verify_total(&self) -> EngineResult<Decimal> {
        let recomputed = self.recomputed_total();
        if recomputed == self.all_total_amount {
            Ok(recomputed)
        } else {
            Err(EngineError::CalculationError {
                message: format!(
                    "stored allTotalAmount {} for {} does not match components total {}",
                    self.all_total_amount, self.month, recomputed
                ),
            })
        }
    }
}

/// A payment ready to be submitted for one student and month.
///
/// `all_total_amount` always equals `total_amount + transport_amount + late_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    /// Student the payment is for.
    pub student_id: String,
    /// Student's class.
    pub class_name: String,
    /// Student's section.
    pub section: String,
    /// Academic session.
    pub session: String,
    /// The month being paid.
    pub month: AcademicMonth,
    /// Per-kind amounts excluding transport and late fee.
    pub fee_amounts: BTreeMap<FeeKind, Decimal>,
    /// Sum of `fee_amounts`.
    pub total_amount: Decimal,
    /// Transport charge.
    pub transport_amount: Decimal,
    /// Late-fee surcharge.
    pub late_amount: Decimal,
    /// Grand total.
    pub all_total_amount: Decimal,
}

impl PaymentDraft {
    /// Records a successful submission, producing the persisted form.
    pub fn confirm(self, paid_on: NaiveDate) -> PaymentRecord {
        PaymentRecord {
            student_id: self.student_id,
            class_name: self.class_name,
            section: self.section,
            session: self.session,
            month: self.month,
            status: PaymentStatus::Paid,
            total_amount: self.total_amount,
            transport_amount: self.transport_amount,
            late_amount: self.late_amount,
            all_total_amount: self.all_total_amount,
            fee_amounts: self.fee_amounts,
            paid_on: Some(paid_on),
        }
    }
}
