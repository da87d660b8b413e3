//! Request types for the payslip engine API.
//!
//! This module defines the JSON request bodies of the payroll endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::response::ApiError;

/// Request body for `POST /payrolls/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// The employee to calculate payroll for.
    pub employee_id: String,
    /// The payroll month as `YYYY-MM`.
    pub month_year: String,
    /// Allowances granted for the month; zero when omitted.
    #[serde(default)]
    pub allowances: Decimal,
}

impl CalculatePayrollRequest {
    /// Rejects requests whose fields are present but empty.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.employee_id.trim().is_empty() {
            return Err(ApiError::validation_error("employee_id must not be empty"));
        }
        Ok(())
    }
}

/// Request body for `POST /payrolls/{employee_id}/{month_year}/email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendPayslipRequest {
    /// Address to send the payslip to.
    pub to_email: String,
}

impl SendPayslipRequest {
    /// Performs a shallow address check; the mail relay has the final say.
    pub fn validate(&self) -> Result<(), ApiError> {
        let address = self.to_email.trim();
        let valid = match address.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        };
        if !valid {
            return Err(ApiError::with_details(
                "VALIDATION_ERROR",
                format!("Invalid email address: '{}'", self.to_email),
                "to_email must look like user@example.com",
            ));
        }
        Ok(())
    }
}
