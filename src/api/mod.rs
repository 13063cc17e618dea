//! HTTP API module for the school fee engine.
//!
//! This module exposes the fee calculations as stateless JSON endpoints
//! backed by the school's configured fee schedules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MonthFeeRequest, ReconcileRequest, SelectedMonthsRequest, SummaryRequest};
pub use response::{ApiError, ReconcileResponse, SummaryResponse, TotalResponse};
pub use state::AppState;
