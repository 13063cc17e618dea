//! Late-fee window.
//!
//! Decides whether a late-fee line item is chargeable for a target month.
//!
//! The comparison mixes two numberings: "now" is a calendar month index
//! (January = 0) used as-is, while the target month is its position in the
//! academic session (April = 0). The session start is expressed on the
//! calendar numbering (April = 3). This mismatch decides which months are
//! surcharged today and is kept exactly as it is.

use tracing::debug;

use super::academic_calendar::month_index;
use crate::models::AuditStep;

/// Calendar index (January = 0) of the session-start month used by the
/// late-fee window.
pub const LATE_FEE_SESSION_START_INDEX: u32 = 3;

/// Rule identifier recorded on late-fee audit steps.
pub const LATE_FEE_RULE_ID: &str = "late_fee_window";

/// The result of evaluating the late-fee window, including the audit step.
#[derive(Debug, Clone)]
pub struct LateFeeEvaluation {
    /// Whether a late fee may be charged for the target month.
    pub applicable: bool,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Returns true if a late fee applies to `target_month`.
///
/// With `c = now_month_index`, `t` the session position of `target_month`
/// and `s = session_start_index`:
/// - `c >= s` and `t >= s`: applies only when `t < c`
/// - `c < s` and `t >= s`: always applies
/// - otherwise: does not apply
///
/// An unrecognised month name never raises; it simply does not apply.
///
/// # Example
///
/// ```
/// use school_fee_engine::calculation::{is_late_fee_applicable, LATE_FEE_SESSION_START_INDEX};
///
/// // August (calendar index 7): July sits at session position 3 < 7.
/// assert!(is_late_fee_applicable(7, "July", LATE_FEE_SESSION_START_INDEX));
/// // June sits at session position 2, below the session start index.
/// assert!(!is_late_fee_applicable(7, "June", LATE_FEE_SESSION_START_INDEX));
/// // February (calendar index 1) wraps: every month from position 3 applies.
/// assert!(is_late_fee_applicable(1, "November", LATE_FEE_SESSION_START_INDEX));
/// assert!(!is_late_fee_applicable(7, "Smarch", LATE_FEE_SESSION_START_INDEX));
/// ```
pub fn is_late_fee_applicable(
    now_month_index: u32,
    target_month: &str,
    session_start_index: u32,
) -> bool {
    evaluate_late_fee(now_month_index, target_month, session_start_index, 0).applicable
}

/// Evaluates the late-fee window and records the decision as an audit step.
///
/// See [`is_late_fee_applicable`] for the rule.
pub fn evaluate_late_fee(
    now_month_index: u32,
    target_month: &str,
    session_start_index: u32,
    step_number: u32,
) -> LateFeeEvaluation {
    let input = serde_json::json!({
        "now_month_index": now_month_index,
        "target_month": target_month,
        "session_start_index": session_start_index
    });

    let target_index = match month_index(target_month) {
        Ok(index) => index as u32,
        Err(err) => {
            debug!(target_month, error = %err, "Late fee not applicable: unparseable month");
            return LateFeeEvaluation {
                applicable: false,
                audit_step: audit_step(
                    step_number,
                    input,
                    false,
                    format!("'{}' is not a recognised month - no late fee", target_month),
                ),
            };
        }
    };

    let c = now_month_index;
    let t = target_index;
    let s = session_start_index;

    let (applicable, reasoning) = if c >= s && t >= s {
        (
            t < c,
            format!(
                "Current index {} and target index {} both at or after session start {}: late fee {} (target {} current)",
                c,
                t,
                s,
                if t < c { "applies" } else { "does not apply" },
                if t < c { "before" } else { "not before" }
            ),
        )
    } else if c < s && t >= s {
        (
            true,
            format!(
                "Current index {} before session start {} and target index {} at or after it: late fee applies",
                c, s, t
            ),
        )
    } else {
        (
            false,
            format!(
                "Target index {} before session start {}: no late fee",
                t, s
            ),
        )
    };

    debug!(
        now_month_index = c,
        target_month,
        target_index = t,
        session_start_index = s,
        applicable,
        "Evaluated late fee window"
    );

    let mut step = audit_step(step_number, input, applicable, reasoning);
    step.output["target_index"] = serde_json::json!(t);

    LateFeeEvaluation {
        applicable,
        audit_step: step,
    }
}

fn audit_step(
    step_number: u32,
    input: serde_json::Value,
    applicable: bool,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: LATE_FEE_RULE_ID.to_string(),
        rule_name: "Late Fee Window".to_string(),
        input,
        output: serde_json::json!({ "applicable": applicable }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AcademicMonth;

    const S: u32 = LATE_FEE_SESSION_START_INDEX;

    #[test]
    fn test_august_surcharges_july_but_not_june() {
        // June is session position 2, below the start index 3.
        assert!(!is_late_fee_applicable(7, "June", S));
        // July is position 3, which is before calendar index 7.
        assert!(is_late_fee_applicable(7, "July", S));
    }

    #[test]
    fn test_current_or_later_positions_not_surcharged() {
        // August calendar index 7; position 7 is November.
        assert!(!is_late_fee_applicable(7, "November", S));
        assert!(!is_late_fee_applicable(7, "March", S));
        // Position 6 (October) is strictly before 7.
        assert!(is_late_fee_applicable(7, "October", S));
    }

    #[test]
    fn test_early_calendar_year_wraps_around() {
        // January (0), February (1), March (2) are before the start index.
        for now in 0..S {
            assert!(is_late_fee_applicable(now, "July", S));
            assert!(is_late_fee_applicable(now, "March", S));
            assert!(!is_late_fee_applicable(now, "April", S));
            assert!(!is_late_fee_applicable(now, "June", S));
        }
    }

    #[test]
    fn test_first_three_session_months_never_surcharged() {
        for now in 0..12 {
            for month in [AcademicMonth::April, AcademicMonth::May, AcademicMonth::June] {
                assert!(!is_late_fee_applicable(now, month.name(), S));
            }
        }
    }

    #[test]
    fn test_unknown_month_is_not_applicable() {
        let evaluation = evaluate_late_fee(7, "Juneuary", S, 4);
        assert!(!evaluation.applicable);
        assert_eq!(evaluation.audit_step.step_number, 4);
        assert_eq!(evaluation.audit_step.rule_id, LATE_FEE_RULE_ID);
        assert!(evaluation.audit_step.reasoning.contains("Juneuary"));
    }

    #[test]
    fn test_session_start_zero_compares_positions_directly() {
        assert!(is_late_fee_applicable(7, "June", 0));
        assert!(!is_late_fee_applicable(2, "June", 0));
    }

    #[test]
    fn test_audit_step_records_inputs_and_decision() {
        let evaluation = evaluate_late_fee(7, "July", S, 2);
        assert!(evaluation.applicable);
        assert_eq!(evaluation.audit_step.input["target_month"], "July");
        assert_eq!(evaluation.audit_step.output["applicable"], true);
        assert_eq!(evaluation.audit_step.output["target_index"], 3);
    }

    #[test]
    fn test_same_inputs_same_output() {
        for now in 0..12 {
            for month in AcademicMonth::ALL {
                assert_eq!(
                    is_late_fee_applicable(now, month.name(), S),
                    is_late_fee_applicable(now, month.name(), S)
                );
            }
        }
    }
}
