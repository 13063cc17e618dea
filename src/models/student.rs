//! Student fee profile.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The student attributes that influence fee computation and reporting.
///
/// `vehicle_price` is the only student-specific pricing input: it replaces
/// the catalog amount of any dynamic transportation fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeeProfile {
    /// Unique identifier for the student.
    pub id: String,
    /// Display name, carried through to report rows.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub name: String,
    /// Roll number within the section.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub roll_number: String,
    /// The class the student is enrolled in (e.g. "5-A").
    pub class_name: String,
    /// The section within the class.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub section: String,
    /// Monthly transport price for this student; zero if they use no vehicle.
    #[serde(default, deserialize_with = "crate::models::serde_helpers::null_as_default")]
    pub vehicle_price: Decimal,
}
