//! Core data models for the payslip engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod month_year;
mod payroll;

pub use attendance::{AttendanceRecord, LeaveType, MonthlySummary};
pub use employee::Employee;
pub use month_year::MonthYear;
pub use payroll::{DeductionDetail, DeductionKind, Payroll, PayrollStatus};
