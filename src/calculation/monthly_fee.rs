//! Monthly fee aggregation.
//!
//! This module prices one student's fees month by month. Every surface that
//! shows an amount owed (deposit form, due report, fee report, fee card) goes
//! through [`compute_month`], so all of them agree on:
//!
//! - dynamic transport fees are priced at the student's vehicle price
//! - late fees are charged only inside the late-fee window, and omitted
//!   from the breakdown when not charged
//! - line items of the same kind in the same month are summed
//!
//! Nothing here is cached: each call recomputes from the catalog and profile
//! it is given.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::academic_calendar::calendar_month_index;
use super::fee_schedule::FeeCatalog;
use super::late_fee::{LATE_FEE_SESSION_START_INDEX, evaluate_late_fee};
use crate::models::{
    AcademicMonth, AuditStep, FeeComponent, FeeKind, FeeLineItem, FeeTypeMode, MonthlyBreakdown,
    PaymentDraft, StudentFeeProfile,
};

/// Rule identifier for line items charged at their catalog amount.
pub const STATIC_FEE_RULE_ID: &str = "static_fee";

/// Rule identifier for transport priced from the student's vehicle.
pub const DYNAMIC_TRANSPORT_RULE_ID: &str = "dynamic_transport_fee";

/// Computes the fee breakdown for one student and month.
///
/// # Arguments
///
/// * `catalog` - The school's fee catalog
/// * `profile` - The student being priced
/// * `session` - The academic session, e.g. "2024-25"
/// * `month` - The month to price
/// * `now` - Today's date; its calendar month drives the late-fee window
///
/// # Example
///
/// ```
/// use school_fee_engine::calculation::compute_month;
/// use school_fee_engine::models::{
///     AcademicMonth, FeeKind, FeeLineItem, FeeTypeMode, StudentFeeProfile,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let all_months: std::collections::BTreeSet<_> = AcademicMonth::ALL.into_iter().collect();
/// let catalog = vec![
///     FeeLineItem {
///         class_name: "5-A".to_string(),
///         session: "2024-25".to_string(),
///         kind: FeeKind::TuitionFee,
///         amount: Decimal::new(500, 0),
///         mode: FeeTypeMode::Static,
///         months_applicable: all_months.clone(),
///     },
///     FeeLineItem {
///         class_name: "5-A".to_string(),
///         session: "2024-25".to_string(),
///         kind: FeeKind::TransportationFee,
///         amount: Decimal::ZERO,
///         mode: FeeTypeMode::Dynamic,
///         months_applicable: all_months,
///     },
/// ];
/// let profile = StudentFeeProfile {
///     id: "stu_001".to_string(),
///     name: String::new(),
///     roll_number: String::new(),
///     class_name: "5-A".to_string(),
///     section: "A".to_string(),
///     vehicle_price: Decimal::new(300, 0),
/// };
/// let now = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
///
/// let breakdown = compute_month(&catalog, &profile, "2024-25", AcademicMonth::June, now);
/// assert_eq!(breakdown.amount_for(FeeKind::TuitionFee), Decimal::new(500, 0));
/// assert_eq!(breakdown.amount_for(FeeKind::TransportationFee), Decimal::new(300, 0));
/// assert_eq!(breakdown.month_total, Decimal::new(800, 0));
/// ```
pub fn compute_month<C>(
    catalog: &C,
    profile: &StudentFeeProfile,
    session: &str,
    month: AcademicMonth,
    now: NaiveDate,
) -> MonthlyBreakdown
where
    C: FeeCatalog + ?Sized,
{
    let now_index = calendar_month_index(now);
    let vehicle_price = effective_vehicle_price(profile);

    let mut components: Vec<FeeComponent> = Vec::new();
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    for item in catalog.items_for_month(&profile.class_name, session, month) {
        let (amount, audit_step) =
            effective_amount(item, vehicle_price, now_index, month, step_number);
        audit_steps.push(audit_step);
        step_number += 1;

        if item.kind == FeeKind::LateFee && amount == Decimal::ZERO {
            continue;
        }

        match components.iter_mut().find(|c| c.kind == item.kind) {
            Some(existing) => existing.amount += amount,
            None => components.push(FeeComponent {
                kind: item.kind,
                amount,
            }),
        }
    }

    let month_total: Decimal = components.iter().map(|c| c.amount).sum();

    debug!(
        student_id = %profile.id,
        class_name = %profile.class_name,
        session,
        month = %month,
        components = components.len(),
        month_total = %month_total,
        "Computed monthly fee breakdown"
    );

    MonthlyBreakdown {
        student_id: profile.id.clone(),
        class_name: profile.class_name.clone(),
        session: session.to_string(),
        month,
        components,
        month_total,
        audit_steps,
    }
}

/// Sums the monthly totals over a selection of months.
///
/// Duplicate months in the selection are counted once. Adding a month never
/// decreases the total.
pub fn compute_total_for_months<C>(
    catalog: &C,
    profile: &StudentFeeProfile,
    session: &str,
    months: &[AcademicMonth],
    now: NaiveDate,
) -> Decimal
where
    C: FeeCatalog + ?Sized,
{
    distinct_months(months)
        .into_iter()
        .map(|month| compute_month(catalog, profile, session, month, now).month_total)
        .sum()
}

/// Builds one payment draft per selected month, ready for submission.
///
/// Drafts come back in academic order with duplicates removed. Each draft
/// splits the month into `fee_amounts` (everything but transport and late
/// fee), `transport_amount`, and `late_amount`; `all_total_amount` is their sum.
pub fn build_submission_payload<C>(
    catalog: &C,
    profile: &StudentFeeProfile,
    session: &str,
    months: &[AcademicMonth],
    now: NaiveDate,
) -> Vec<PaymentDraft>
where
    C: FeeCatalog + ?Sized,
{
    distinct_months(months)
        .into_iter()
        .map(|month| {
            let breakdown = compute_month(catalog, profile, session, month, now);
            let total_amount = breakdown.fees_total();
            let transport_amount = breakdown.transport_amount();
            let late_amount = breakdown.late_amount();

            PaymentDraft {
                student_id: profile.id.clone(),
                class_name: profile.class_name.clone(),
                section: profile.section.clone(),
                session: session.to_string(),
                month,
                fee_amounts: breakdown.fee_amounts(),
                total_amount,
                transport_amount,
                late_amount,
                all_total_amount: total_amount + transport_amount + late_amount,
            }
        })
        .collect()
}

fn distinct_months(months: &[AcademicMonth]) -> BTreeSet<AcademicMonth> {
    months.iter().copied().collect()
}

fn effective_vehicle_price(profile: &StudentFeeProfile) -> Decimal {
    if profile.vehicle_price < Decimal::ZERO {
        warn!(
            student_id = %profile.id,
            vehicle_price = %profile.vehicle_price,
            "Negative vehicle price treated as zero"
        );
        Decimal::ZERO
    } else {
        profile.vehicle_price
    }
}

/// Prices one line item and records how.
fn effective_amount(
    item: &FeeLineItem,
    vehicle_price: Decimal,
    now_index: u32,
    month: AcademicMonth,
    step_number: u32,
) -> (Decimal, AuditStep) {
    match item.kind {
        FeeKind::LateFee => {
            let evaluation = evaluate_late_fee(
                now_index,
                month.name(),
                LATE_FEE_SESSION_START_INDEX,
                step_number,
            );
            let amount = if evaluation.applicable {
                item.amount
            } else {
                Decimal::ZERO
            };
            let mut step = evaluation.audit_step;
            step.output["amount"] = serde_json::json!(amount.to_string());
            (amount, step)
        }
        FeeKind::TransportationFee => match item.mode {
            FeeTypeMode::Dynamic => {
                let step = AuditStep {
                    step_number,
                    rule_id: DYNAMIC_TRANSPORT_RULE_ID.to_string(),
                    rule_name: "Dynamic Transport Fee".to_string(),
                    input: serde_json::json!({
                        "kind": item.kind.label(),
                        "catalog_amount": item.amount.to_string(),
                        "vehicle_price": vehicle_price.to_string()
                    }),
                    output: serde_json::json!({ "amount": vehicle_price.to_string() }),
                    reasoning: format!(
                        "Dynamic transport priced at the student's vehicle price {} (catalog amount {} ignored)",
                        vehicle_price, item.amount
                    ),
                };
                (vehicle_price, step)
            }
            FeeTypeMode::Static => (item.amount, static_step(item, month, step_number)),
        },
        FeeKind::TuitionFee
        | FeeKind::LibraryFee
        | FeeKind::ExamFee
        | FeeKind::LaboratoryFee
        | FeeKind::SportsFee
        | FeeKind::AdmissionFee
        | FeeKind::OtherFee => (item.amount, static_step(item, month, step_number)),
    }
}

fn static_step(item: &FeeLineItem, month: AcademicMonth, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: STATIC_FEE_RULE_ID.to_string(),
        rule_name: "Static Fee".to_string(),
        input: serde_json::json!({
            "kind": item.kind.label(),
            "month": month.name(),
            "catalog_amount": item.amount.to_string()
        }),
        output: serde_json::json!({ "amount": item.amount.to_string() }),
        reasoning: format!("{} charged at catalog amount {}", item.kind, item.amount),
    }
}
