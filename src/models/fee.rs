//! Fee catalog models.
//!
//! A school's fee catalog is a list of [`FeeLineItem`]s, each scoped to one
//! class and session. Catalogs arrive from external systems as loosely-typed
//! [`FeeLineItemRecord`]s and are converted into the typed form before any
//! pricing happens.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AcademicMonth;
use crate::error::{EngineError, EngineResult};

/// The closed set of fee components a school can configure.
///
/// Serialized using the display labels the school configuration uses
/// (e.g. `"Tuition Fee"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeeKind {
    /// Tuition.
    #[serde(rename = "Tuition Fee")]
    TuitionFee,
    /// Transport; may be priced per student (see [`FeeTypeMode::Dynamic`]).
    #[serde(rename = "Transportation Fee")]
    TransportationFee,
    /// Late-payment surcharge, gated by the late-fee window.
    #[serde(rename = "Late Fee")]
    LateFee,
    /// Library.
    #[serde(rename = "Library Fee")]
    LibraryFee,
    /// Examinations.
    #[serde(rename = "Exam Fee")]
    ExamFee,
    /// Laboratory.
    #[serde(rename = "Laboratory Fee")]
    LaboratoryFee,
    /// Sports.
    #[serde(rename = "Sports Fee")]
    SportsFee,
    /// Admission.
    #[serde(rename = "Admission Fee")]
    AdmissionFee,
    /// Anything else the school charges.
    #[serde(rename = "Other Fee")]
    OtherFee,
}

impl FeeKind {
    /// Every fee kind, in display order.
    pub const ALL: [FeeKind; 9] = [
        FeeKind::TuitionFee,
        FeeKind::TransportationFee,
        FeeKind::LateFee,
        FeeKind::LibraryFee,
        FeeKind::ExamFee,
        FeeKind::LaboratoryFee,
        FeeKind::SportsFee,
        FeeKind::AdmissionFee,
        FeeKind::OtherFee,
    ];

    /// The display label, e.g. `"Tuition Fee"`.
    pub fn label(self) -> &'static str {
        match self {
            FeeKind::TuitionFee => "Tuition Fee",
            FeeKind::TransportationFee => "Transportation Fee",
            FeeKind::LateFee => "Late Fee",
            FeeKind::LibraryFee => "Library Fee",
            FeeKind::ExamFee => "Exam Fee",
            FeeKind::LaboratoryFee => "Laboratory Fee",
            FeeKind::SportsFee => "Sports Fee",
            FeeKind::AdmissionFee => "Admission Fee",
            FeeKind::OtherFee => "Other Fee",
        }
    }

    /// True for the kinds a payment record tracks outside `feeAmounts`.
    pub fn is_tracked_separately(self) -> bool {
        matches!(self, FeeKind::TransportationFee | FeeKind::LateFee)
    }
}

impl fmt::Display for FeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeeKind {
    type Err = String;

    /// Accepts either the display label or the compact form
    /// (`"Tuition Fee"`, `"TuitionFee"`, `"tuition fee"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = compact(s);
        FeeKind::ALL
            .into_iter()
            .find(|kind| compact(kind.label()) == wanted)
            .ok_or_else(|| format!("unknown selectedFee '{}'", s))
    }
}

fn compact(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether a line item's amount comes from the catalog or the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeeTypeMode {
    /// The catalog `amount` is charged as-is.
    #[default]
    Static,
    /// The amount is derived from student data (only transport uses this).
    Dynamic,
}

/// One configured, validated fee component for a class and session.
///
/// # Example
///
/// ```
/// use school_fee_engine::models::{AcademicMonth, FeeKind, FeeLineItem, FeeTypeMode};
/// use rust_decimal::Decimal;
///
/// let item = FeeLineItem {
///     class_name: "5-A".to_string(),
///     session: "2024-25".to_string(),
///     kind: FeeKind::TuitionFee,
///     amount: Decimal::new(500, 0),
///     mode: FeeTypeMode::Static,
///     months_applicable: AcademicMonth::ALL.into_iter().collect(),
/// };
/// assert!(item.applies_to("5-A", "2024-25", AcademicMonth::June));
/// assert!(!item.applies_to("5-a", "2024-25", AcademicMonth::June));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeLineItem {
    /// The class this item is charged to (exact, case-sensitive match).
    pub class_name: String,
    /// The academic session, e.g. "2024-25".
    pub session: String,
    /// Which fee component this is.
    #[serde(rename = "selectedFee")]
    pub kind: FeeKind,
    /// Static charge; ignored for dynamic transport.
    pub amount: Decimal,
    /// Static or dynamic pricing.
    #[serde(rename = "feeTypeMode", default)]
    pub mode: FeeTypeMode,
    /// Months of the session this item is charged for.
    pub months_applicable: BTreeSet<AcademicMonth>,
}

impl FeeLineItem {
    /// True if the item is scoped to `class_name`/`session` and charged in `month`.
    pub fn applies_to(&self, class_name: &str, session: &str, month: AcademicMonth) -> bool {
        self.class_name == class_name
            && self.session == session
            && self.months_applicable.contains(&month)
    }

    /// True if the amount must be taken from the student's vehicle price.
    pub fn is_dynamic_transport(&self) -> bool {
        self.kind == FeeKind::TransportationFee && self.mode == FeeTypeMode::Dynamic
    }

    /// Converts a raw catalog record into a validated line item.
    ///
    /// Absent amounts default to zero and absent month lists to empty.
    /// Unrecognised month names inside `monthsApplicable` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedLineItem`] when `selectedFee` is missing
    /// or unrecognised, or when `amount` is negative.
    pub fn from_record(index: usize, record: FeeLineItemRecord) -> EngineResult<Self> {
        let kind = match record.selected_fee.as_deref() {
            None => {
                return Err(EngineError::MalformedLineItem {
                    index,
                    message: "missing selectedFee".to_string(),
                });
            }
            Some(raw) => raw
                .parse::<FeeKind>()
                .map_err(|message| EngineError::MalformedLineItem { index, message })?,
        };

        let amount = record.amount.unwrap_or(Decimal::ZERO);
        if amount < Decimal::ZERO {
            return Err(EngineError::MalformedLineItem {
                index,
                message: format!("negative amount {}", amount),
            });
        }

        let mode = match record.fee_type_mode.as_deref().map(str::trim) {
            Some(m) if m.eq_ignore_ascii_case("dynamic") => FeeTypeMode::Dynamic,
            _ => FeeTypeMode::Static,
        };

        let months_applicable = record
            .months_applicable
            .iter()
            .filter_map(|name| match name.parse::<AcademicMonth>() {
                Ok(month) => Some(month),
                Err(_) => {
                    warn!(index, month = %name, "Dropping unknown month from fee line item");
                    None
                }
            })
            .collect();

        Ok(FeeLineItem {
            class_name: record.class_name.unwrap_or_default(),
            session: record.session.unwrap_or_default(),
            kind,
            amount,
            mode,
            months_applicable,
        })
    }
}

/// A fee line item as supplied by the school configuration or an API caller.
///
/// Every field is optional so that one bad entry never fails deserialization
/// of a whole catalog; validation happens in [`FeeLineItem::from_record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeLineItemRecord {
    /// Class name scope.
    pub class_name: Option<String>,
    /// Session scope.
    pub session: Option<String>,
    /// Fee kind label.
    pub selected_fee: Option<String>,
    /// Static amount.
    pub amount: Option<Decimal>,
    /// "Static" or "Dynamic".
    pub fee_type_mode: Option<String>,
    /// Month names this item is charged for.
    #[serde(deserialize_with = "crate::models::serde_helpers::vec_skipping_nulls")]
    pub months_applicable: Vec<String>,
}
