//! Storage collaborators consumed by the payslip engine.
//!
//! The employee directory, attendance storage and payroll persistence live
//! outside this crate. This module defines the contracts the engine needs
//! from them, plus thread-safe in-memory implementations used by the binary
//! and by tests.

mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::EngineError;
use crate::models::{AttendanceRecord, Employee, MonthYear, Payroll};

pub use in_memory::{InMemoryAttendanceStore, InMemoryEmployeeDirectory, InMemoryPayrollStore};

/// Errors reported by storage collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with the same unique key already exists.
    #[error("record already exists")]
    Conflict,
    /// The backend failed.
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for EngineError {
    /// Conflicts carry no key here; callers that know the key map them themselves.
    fn from(error: StoreError) -> Self {
        EngineError::StorageFailure {
            message: error.to_string(),
        }
    }
}

/// Read access to the employee directory.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee, returning `None` if the id is unknown.
    async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError>;
}

/// Read access to daily attendance records.
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    /// Lists the employee's records dated within the given month.
    async fn list_records(
        &self,
        employee_id: &str,
        month: MonthYear,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;
}

/// Durable storage of payroll records.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Creates the payroll if none exists for its (employee, month) pair.
    ///
    /// Must be atomic: concurrent saves for the same pair yield exactly one
    /// success and [`StoreError::Conflict`] for the rest.
    async fn save(&self, payroll: Payroll) -> Result<Payroll, StoreError>;

    /// Finds the payroll for an employee and month.
    async fn find_by_employee_and_month(
        &self,
        employee_id: &str,
        month: MonthYear,
    ) -> Result<Option<Payroll>, StoreError>;
}
