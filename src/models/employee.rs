//! Employee model.
//!
//! The employee directory is owned by an external collaborator; this crate
//! only reads [`Employee`] values from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee on the monthly payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name, as printed on the payslip.
    pub name: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Contracted monthly salary for a full standard month.
    pub base_salary: Decimal,
    /// Bank account the net salary is paid into.
    #[serde(default)]
    pub bank_account: String,
    /// The date the employee joined.
    pub join_date: NaiveDate,
    /// Number of registered tax dependents.
    #[serde(default)]
    pub dependents: u32,
}

impl Employee {
    /// Checks the invariants payroll arithmetic relies on.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Nguyen Van An".to_string(),
    ///     position: "Engineer".to_string(),
    ///     base_salary: Decimal::from(10_000_000),
    ///     bank_account: "0011001234567".to_string(),
    ///     join_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     dependents: 0,
    /// };
    /// assert!(employee.validate().is_ok());
    ///
    /// employee.base_salary = Decimal::ZERO;
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_salary <= Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "base_salary".to_string(),
                message: format!(
                    "must be greater than zero for employee '{}', got {}",
                    self.id, self.base_salary
                ),
            });
        }
        Ok(())
    }
}
