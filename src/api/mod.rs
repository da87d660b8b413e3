//! HTTP API module for the payslip engine.
//!
//! This module provides the REST endpoints for calculating monthly payroll
//! and exporting or emailing payslips.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculatePayrollRequest, SendPayslipRequest};
pub use response::{ApiError, MessageResponse};
pub use state::AppState;
