//! Calculation logic for the payslip engine.
//!
//! This module contains the pure calculation functions for monthly payroll:
//! attendance aggregation into monthly totals, the progressive income tax
//! schedule, and the gross/net salary derivation.

mod attendance_summary;
mod income_tax;
mod salary;

pub use attendance_summary::summarize_month;
pub use income_tax::{TAX_BRACKETS, TaxBracket, bracket_for, income_tax};
pub use salary::{
    DEPENDENT_DEDUCTION, OVERTIME_MULTIPLIER, PERSONAL_DEDUCTION, SOCIAL_INSURANCE_RATE,
    STANDARD_DAILY_HOURS, STANDARD_WORKING_DAYS, SalaryBreakdown, calculate_salary, hourly_rate,
    new_payroll, overtime_pay,
};
