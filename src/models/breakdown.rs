//! Monthly fee breakdown models.
//!
//! This module contains the [`MonthlyBreakdown`] type produced by the monthly
//! fee aggregator, together with its [`FeeComponent`] lines and the
//! [`AuditStep`]s that explain how each line was priced. Breakdowns are
//! derived on demand and never persisted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AcademicMonth, FeeKind};

/// A single priced fee component within a month.
///
/// # Example
///
/// ```
/// use school_fee_engine::models::{FeeComponent, FeeKind};
/// use rust_decimal::Decimal;
///
/// let component = FeeComponent {
///     kind: FeeKind::TuitionFee,
///     amount: Decimal::new(500, 0),
/// };
/// assert_eq!(component.kind.label(), "Tuition Fee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeComponent {
    /// The fee component.
    pub kind: FeeKind,
    /// Effective amount after dynamic pricing and late-fee gating.
    pub amount: Decimal,
}

/// A single step in the audit trace recording a pricing decision.
///
/// Each step captures the input, output, and reasoning for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Fees owed by one student for one month.
///
/// Components appear in the order their kind first occurs in the catalog;
/// line items sharing a kind are summed into one component. Components with
/// a zero late fee are omitted entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    /// The student this breakdown was computed for.
    pub student_id: String,
    /// The student's class.
    pub class_name: String,
    /// The academic session.
    pub session: String,
    /// The month priced.
    pub month: AcademicMonth,
    /// Priced components.
    pub components: Vec<FeeComponent>,
    /// Sum of all component amounts, transport and late fee included.
    pub month_total: Decimal,
    /// How each line item was priced.
    pub audit_steps: Vec<AuditStep>,
}

impl MonthlyBreakdown {
    /// The amount charged for `kind` this month, or zero.
    pub fn amount_for(&self, kind: FeeKind) -> Decimal {
        self.components
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Transport charge for the month.
    pub fn transport_amount(&self) -> Decimal {
        self.amount_for(FeeKind::TransportationFee)
    }

    /// Late-fee surcharge for the month.
    pub fn late_amount(&self) -> Decimal {
        self.amount_for(FeeKind::LateFee)
    }

    /// Every component except transport and late fee.
    pub fn fee_amounts(&self) -> BTreeMap<FeeKind, Decimal> {
        self.components
            .iter()
            .filter(|c| !c.kind.is_tracked_separately())
            .map(|c| (c.kind, c.amount))
            .collect()
    }

    /// Sum of [`MonthlyBreakdown::fee_amounts`].
    pub fn fees_total(&self) -> Decimal {
        self.components
            .iter()
            .filter(|c| !c.kind.is_tracked_separately())
            .map(|c| c.amount)
            .sum()
    }
}
