//! Error types for the payslip engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure path of payroll calculation, payslip rendering and
//! payslip delivery.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::MonthYear;
use crate::payslip::TransportError;

/// The main error type for the payslip engine.
///
/// Every core operation returns this error type. Each variant is a distinct
/// kind the calling layer can map to a response without inspecting messages.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The employee directory has no record for the identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// The employee has neither working days nor leave days in the month.
    #[error("No attendance records found for employee '{employee_id}' in {month}")]
    NoAttendanceData {
        /// The employee whose attendance was aggregated.
        employee_id: String,
        /// The payroll month.
        month: MonthYear,
    },

    /// A month-year string was not in `YYYY-MM` form.
    #[error("Invalid month_year '{value}', expected YYYY-MM")]
    InvalidMonthFormat {
        /// The rejected input.
        value: String,
    },

    /// No payroll has been calculated for the employee and month.
    #[error("Payroll not found for employee '{employee_id}' in {month}")]
    PayrollNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The payroll month.
        month: MonthYear,
    },

    /// A payroll already exists for the employee and month.
    #[error("Payroll already calculated for employee '{employee_id}' in {month}")]
    DuplicatePayroll {
        /// The employee identifier.
        employee_id: String,
        /// The payroll month.
        month: MonthYear,
    },

    /// The payslip document could not be written.
    #[error("Failed to render payslip: {source}")]
    RenderFailure {
        /// The underlying writer error.
        #[source]
        source: std::io::Error,
    },

    /// The mail transport refused or failed to deliver the payslip.
    #[error("Failed to deliver payslip to '{recipient}': {source}")]
    DeliveryFailed {
        /// The recipient address.
        recipient: String,
        /// The transport's error.
        #[source]
        source: TransportError,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Allowances must not be negative.
    #[error("Invalid allowances {value}: must not be negative")]
    InvalidAllowances {
        /// The rejected amount.
        value: Decimal,
    },

    /// A salary figure exceeded the range of the decimal type.
    #[error("Salary figures for employee '{employee_id}' are too large to calculate")]
    SalaryOverflow {
        /// The employee whose figures overflowed.
        employee_id: String,
    },

    /// A storage collaborator failed for a reason other than not-found/conflict.
    #[error("Storage failure: {message}")]
    StorageFailure {
        /// The backend's description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::str::FromStr;

    fn january() -> MonthYear {
        MonthYear::from_str("2026-01").unwrap()
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/service.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/service.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_no_attendance_displays_employee_and_month() {
        let error = EngineError::NoAttendanceData {
            employee_id: "emp_003".to_string(),
            month: january(),
        };
        assert_eq!(
            error.to_string(),
            "No attendance records found for employee 'emp_003' in 2026-01"
        );
    }

    #[test]
    fn test_invalid_month_format_displays_value() {
        let error = EngineError::InvalidMonthFormat {
            value: "2026/01".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid month_year '2026/01', expected YYYY-MM"
        );
    }

    #[test]
    fn test_duplicate_payroll_displays_employee_and_month() {
        let error = EngineError::DuplicatePayroll {
            employee_id: "emp_001".to_string(),
            month: january(),
        };
        assert_eq!(
            error.to_string(),
            "Payroll already calculated for employee 'emp_001' in 2026-01"
        );
    }

    #[test]
    fn test_delivery_failed_keeps_transport_error_as_source() {
        let error = EngineError::DeliveryFailed {
            recipient: "an@example.com".to_string(),
            source: TransportError::new("connection refused"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to deliver payslip to 'an@example.com': mail transport failure: connection refused"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn test_render_failure_keeps_io_error_as_source() {
        let error = EngineError::RenderFailure {
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(error.to_string(), "Failed to render payslip: disk full");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "base_salary".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'base_salary': must be greater than zero"
        );
    }

    #[test]
    fn test_salary_overflow_displays_employee() {
        let error = EngineError::SalaryOverflow {
            employee_id: "emp_001".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Salary figures for employee 'emp_001' are too large to calculate"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_employee_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "emp_404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_employee_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
