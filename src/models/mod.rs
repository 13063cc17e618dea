//! Core data models for the school fee engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod fee;
mod month;
mod payment;
mod report;
mod serde_helpers;
mod student;

pub use breakdown::{AuditStep, FeeComponent, MonthlyBreakdown};
pub use fee::{FeeKind, FeeLineItem, FeeLineItemRecord, FeeTypeMode};
pub use month::AcademicMonth;
pub use payment::{PaymentDraft, PaymentRecord, PaymentStatus};
pub use report::{FeeReportSummary, ReconciledRow};
pub use student::StudentFeeProfile;
