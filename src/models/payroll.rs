//! Payroll record models.
//!
//! This module contains the persisted [`Payroll`] entity together with its
//! lifecycle [`PayrollStatus`] and the itemised [`DeductionDetail`] lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MonthYear;

/// Lifecycle state of a payroll record.
///
/// Records are created as `Calculated` and may only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Figures computed and stored, not yet paid out.
    Calculated,
    /// Net salary paid to the employee.
    Paid,
}

impl PayrollStatus {
    /// Returns true if moving from `self` to `next` is a forward transition.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::PayrollStatus;
    ///
    /// assert!(PayrollStatus::Calculated.can_advance_to(PayrollStatus::Paid));
    /// assert!(!PayrollStatus::Paid.can_advance_to(PayrollStatus::Calculated));
    /// ```
    pub fn can_advance_to(self, next: PayrollStatus) -> bool {
        next > self
    }
}

/// The kind of an itemised deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Flat social-insurance withholding.
    SocialInsurance,
    /// Progressive personal income tax.
    IncomeTax,
}

/// One itemised deduction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionDetail {
    /// What the deduction is for.
    pub kind: DeductionKind,
    /// The unrounded amount withheld.
    pub amount: Decimal,
}

/// A calculated monthly payroll for one employee.
///
/// Amounts are stored unrounded; rounding only happens when a payslip is
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier of the record.
    pub id: Uuid,
    /// The employee the payroll is for.
    pub employee_id: String,
    /// The payroll month.
    pub month_year: MonthYear,
    /// Days worked in the month.
    pub working_days: u32,
    /// Overtime hours worked in the month.
    pub overtime_hours: Decimal,
    /// Days of leave in the month.
    pub leave_days: u32,
    /// Base salary pro-rated by working days.
    pub basic_salary: Decimal,
    /// Allowances granted for the month.
    pub allowances: Decimal,
    /// Basic salary plus overtime pay plus allowances.
    pub gross_salary: Decimal,
    /// Insurance plus income tax.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions.
    pub net_salary: Decimal,
    /// The deductions, itemised.
    pub deduction_details: Vec<DeductionDetail>,
    /// Lifecycle state.
    pub status: PayrollStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
