//! Monthly salary figures.
//!
//! This module derives gross and net salary from an employee's base salary,
//! their monthly attendance totals and the month's allowances.
//!
//! ## Formulas
//!
//! - basic salary = base salary × (working days / 26)
//! - hourly rate = base salary / (26 × 8)
//! - overtime pay = overtime hours × hourly rate × 1.5
//! - gross = basic salary + overtime pay + allowances
//! - insurance = gross × 10.5%
//! - taxable = gross − insurance − 11,000,000 − dependents × 4,400,000
//! - net = gross − (insurance + income tax)
//!
//! No intermediate value is rounded.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DeductionDetail, DeductionKind, Employee, MonthYear, MonthlySummary, Payroll, PayrollStatus,
};

use super::income_tax::income_tax;

/// Working days in a standard month.
pub const STANDARD_WORKING_DAYS: Decimal = Decimal::from_parts(26, 0, 0, false, 0);

/// Ordinary hours in a standard working day.
pub const STANDARD_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Overtime is paid at 150% of the hourly rate.
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Social-insurance withholding as a share of gross salary (10.5%).
pub const SOCIAL_INSURANCE_RATE: Decimal = Decimal::from_parts(105, 0, 0, false, 3);

/// Monthly personal deduction from taxable income.
pub const PERSONAL_DEDUCTION: Decimal = Decimal::from_parts(11_000_000, 0, 0, false, 0);

/// Monthly deduction from taxable income per registered dependent.
pub const DEPENDENT_DEDUCTION: Decimal = Decimal::from_parts(4_400_000, 0, 0, false, 0);

/// Every intermediate figure of a monthly salary calculation, unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Base salary pro-rated by working days.
    pub basic_salary: Decimal,
    /// Base salary per standard hour.
    pub hourly_rate: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Allowances granted for the month.
    pub allowances: Decimal,
    /// Basic salary plus overtime pay plus allowances.
    pub gross_salary: Decimal,
    /// Social-insurance withholding.
    pub insurance: Decimal,
    /// Income left after insurance and personal/dependent deductions; may be negative.
    pub taxable_income: Decimal,
    /// Income tax on the taxable income.
    pub income_tax: Decimal,
    /// Insurance plus income tax.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions.
    pub net_salary: Decimal,
}

impl SalaryBreakdown {
    /// The deductions as itemised lines, in withholding order.
    pub fn deduction_details(&self) -> Vec<DeductionDetail> {
        vec![
            DeductionDetail {
                kind: DeductionKind::SocialInsurance,
                amount: self.insurance,
            },
            DeductionDetail {
                kind: DeductionKind::IncomeTax,
                amount: self.income_tax,
            },
        ]
    }
}

/// Base salary per standard hour: base salary / (26 × 8).
pub fn hourly_rate(base_salary: Decimal) -> Decimal {
    base_salary / (STANDARD_WORKING_DAYS * STANDARD_DAILY_HOURS)
}

/// Overtime pay for a number of overtime hours at 150% of the hourly rate.
///
/// Returns `None` if the product does not fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::overtime_pay;
/// use rust_decimal::Decimal;
///
/// // 20,800,000 / 208 = 100,000 per hour; 4h × 100,000 × 1.5
/// assert_eq!(
///     overtime_pay(Decimal::from(20_800_000), Decimal::from(4)),
///     Some(Decimal::from(600_000))
/// );
/// ```
pub fn overtime_pay(base_salary: Decimal, overtime_hours: Decimal) -> Option<Decimal> {
    overtime_hours
        .checked_mul(hourly_rate(base_salary))?
        .checked_mul(OVERTIME_MULTIPLIER)
}

/// Calculates the month's salary figures for an employee.
///
/// # Errors
///
/// - [`EngineError::InvalidEmployee`] if the base salary is not positive
/// - [`EngineError::InvalidAllowances`] if `allowances` is negative
/// - [`EngineError::SalaryOverflow`] if gross salary does not fit in a `Decimal`
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::calculate_salary;
/// use payslip_engine::models::{Employee, MonthlySummary};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Nguyen Van An".to_string(),
///     position: "Engineer".to_string(),
///     base_salary: Decimal::from(10_000_000),
///     bank_account: String::new(),
///     join_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     dependents: 0,
/// };
/// let summary = MonthlySummary { working_days: 26, overtime_hours: Decimal::ZERO, leave_days: 0 };
///
/// let salary = calculate_salary(&employee, &summary, Decimal::ZERO).unwrap();
/// assert_eq!(salary.gross_salary, Decimal::from(10_000_000));
/// assert_eq!(salary.income_tax, Decimal::ZERO);
/// assert_eq!(salary.net_salary, Decimal::from(8_950_000));
/// ```
pub fn calculate_salary(
    employee: &Employee,
    summary: &MonthlySummary,
    allowances: Decimal,
) -> EngineResult<SalaryBreakdown> {
    employee.validate()?;
    if allowances < Decimal::ZERO {
        return Err(EngineError::InvalidAllowances { value: allowances });
    }

    let overflow = || EngineError::SalaryOverflow {
        employee_id: employee.id.clone(),
    };

    let base_salary = employee.base_salary;
    let basic_salary = base_salary
        .checked_mul(Decimal::from(summary.working_days) / STANDARD_WORKING_DAYS)
        .ok_or_else(overflow)?;
    let hourly_rate = hourly_rate(base_salary);
    let overtime_pay = overtime_pay(base_salary, summary.overtime_hours).ok_or_else(overflow)?;
    let gross_salary = basic_salary
        .checked_add(overtime_pay)
        .and_then(|subtotal| subtotal.checked_add(allowances))
        .ok_or_else(overflow)?;

    // Every figure below is bounded by gross salary
    let insurance = gross_salary * SOCIAL_INSURANCE_RATE;
    let taxable_income = gross_salary
        - insurance
        - PERSONAL_DEDUCTION
        - Decimal::from(employee.dependents) * DEPENDENT_DEDUCTION;
    let income_tax = income_tax(taxable_income);

    let total_deductions = insurance + income_tax;
    let net_salary = gross_salary - total_deductions;

    Ok(SalaryBreakdown {
        basic_salary,
        hourly_rate,
        overtime_pay,
        allowances,
        gross_salary,
        insurance,
        taxable_income,
        income_tax,
        total_deductions,
        net_salary,
    })
}

/// Builds a new `calculated` payroll record from the month's figures.
///
/// The record gets a fresh identifier and creation timestamp; all money
/// fields are copied from `salary` unchanged.
pub fn new_payroll(
    employee_id: &str,
    month_year: MonthYear,
    summary: &MonthlySummary,
    salary: &SalaryBreakdown,
) -> Payroll {
    Payroll {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        month_year,
        working_days: summary.working_days,
        overtime_hours: summary.overtime_hours,
        leave_days: summary.leave_days,
        basic_salary: salary.basic_salary,
        allowances: salary.allowances,
        gross_salary: salary.gross_salary,
        total_deductions: salary.total_deductions,
        net_salary: salary.net_salary,
        deduction_details: salary.deduction_details(),
        status: PayrollStatus::Calculated,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(base_salary: &str, dependents: u32) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Nguyen Van An".to_string(),
            position: "Engineer".to_string(),
            base_salary: dec(base_salary),
            bank_account: "0011001234567".to_string(),
            join_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            dependents,
        }
    }

    fn summary(working_days: u32, overtime_hours: &str, leave_days: u32) -> MonthlySummary {
        MonthlySummary {
            working_days,
            overtime_hours: dec(overtime_hours),
            leave_days,
        }
    }

    #[test]
    fn test_full_month_below_tax_threshold() {
        let employee = create_test_employee("10000000", 0);
        let salary = calculate_salary(&employee, &summary(26, "0", 0), Decimal::ZERO).unwrap();

        assert_eq!(salary.basic_salary, dec("10000000"));
        assert_eq!(salary.gross_salary, dec("10000000"));
        assert_eq!(salary.insurance, dec("1050000"));
        assert_eq!(salary.taxable_income, dec("-2050000"));
        assert_eq!(salary.income_tax, Decimal::ZERO);
        assert_eq!(salary.total_deductions, dec("1050000"));
        assert_eq!(salary.net_salary, dec("8950000"));
    }

    #[test]
    fn test_overtime_and_dependent_reach_fifteen_percent_bracket() {
        let employee = create_test_employee("30000000", 1);
        let salary = calculate_salary(&employee, &summary(26, "10", 0), Decimal::ZERO).unwrap();

        assert_eq!(salary.hourly_rate.round_dp(2), dec("144230.77"));
        assert_eq!(salary.overtime_pay.round_dp(2), dec("2163461.54"));
        assert_eq!(salary.gross_salary.round_dp(2), dec("32163461.54"));
        assert_eq!(salary.insurance.round_dp(2), dec("3377163.46"));
        assert_eq!(salary.taxable_income.round_dp(2), dec("13386298.08"));
        assert_eq!(salary.income_tax.round_dp(2), dec("1257944.71"));
        assert_eq!(salary.total_deductions.round_dp(2), dec("4635108.17"));
        assert_eq!(salary.net_salary.round_dp(2), dec("27528353.37"));
    }

    #[test]
    fn test_partial_month_pro_rates_basic_salary() {
        let employee = create_test_employee("12000000", 0);
        let salary = calculate_salary(&employee, &summary(24, "0", 2), dec("500000")).unwrap();

        assert_eq!(salary.basic_salary.round_dp(2), dec("11076923.08"));
        assert_eq!(
            salary.gross_salary,
            salary.basic_salary + salary.overtime_pay + dec("500000")
        );
        assert_eq!(salary.income_tax, Decimal::ZERO);
    }

    #[test]
    fn test_leave_only_month_has_zero_basic_salary() {
        let employee = create_test_employee("12000000", 0);
        let salary = calculate_salary(&employee, &summary(0, "0", 3), Decimal::ZERO).unwrap();

        assert_eq!(salary.basic_salary, Decimal::ZERO);
        assert_eq!(salary.gross_salary, Decimal::ZERO);
        assert_eq!(salary.net_salary, Decimal::ZERO);
    }

    #[test]
    fn test_totals_are_internally_consistent() {
        let employee = create_test_employee("45000000", 2);
        let salary = calculate_salary(&employee, &summary(25, "7.5", 1), dec("1250000")).unwrap();

        assert_eq!(salary.total_deductions, salary.insurance + salary.income_tax);
        assert_eq!(salary.net_salary, salary.gross_salary - salary.total_deductions);

        let itemised: Decimal = salary.deduction_details().iter().map(|d| d.amount).sum();
        assert_eq!(itemised, salary.total_deductions);
    }

    #[test]
    fn test_negative_allowances_are_rejected() {
        let employee = create_test_employee("10000000", 0);
        match calculate_salary(&employee, &summary(26, "0", 0), dec("-1")) {
            Err(EngineError::InvalidAllowances { value }) => assert_eq!(value, dec("-1")),
            other => panic!("Expected InvalidAllowances, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_base_salary_is_rejected() {
        let employee = create_test_employee("0", 0);
        assert!(matches!(
            calculate_salary(&employee, &summary(26, "0", 0), Decimal::ZERO),
            Err(EngineError::InvalidEmployee { .. })
        ));
    }

    #[test]
    fn test_oversized_allowances_report_overflow() {
        let employee = create_test_employee("10000000", 0);
        match calculate_salary(&employee, &summary(26, "0", 0), Decimal::MAX) {
            Err(EngineError::SalaryOverflow { employee_id }) => assert_eq!(employee_id, "emp_001"),
            other => panic!("Expected SalaryOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_base_salary_reports_overflow() {
        let employee = create_test_employee("79228162514264337593543950335", 0);
        assert!(matches!(
            calculate_salary(&employee, &summary(26, "1000", 0), Decimal::ZERO),
            Err(EngineError::SalaryOverflow { .. })
        ));
    }

    #[test]
    fn test_very_large_allowances_within_range_still_calculate() {
        let employee = create_test_employee("10000000", 0);
        let allowances = dec("1000000000000000000000000000");
        let salary = calculate_salary(&employee, &summary(26, "0", 0), allowances).unwrap();

        assert_eq!(salary.gross_salary, allowances + dec("10000000"));
        assert_eq!(salary.net_salary, salary.gross_salary - salary.total_deductions);
    }

    #[test]
    fn test_overtime_pay_reports_overflow_as_none() {
        assert_eq!(overtime_pay(Decimal::MAX, dec("1000")), None);
        assert_eq!(overtime_pay(dec("20800000"), dec("4")), Some(dec("600000")));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let employee = create_test_employee("30000000", 1);
        let first = calculate_salary(&employee, &summary(26, "10", 0), Decimal::ZERO).unwrap();
        let second = calculate_salary(&employee, &summary(26, "10", 0), Decimal::ZERO).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_new_payroll_copies_figures_and_starts_calculated() {
        let employee = create_test_employee("10000000", 0);
        let month = MonthYear::new(2026, 1).unwrap();
        let month_summary = summary(26, "2", 0);
        let salary = calculate_salary(&employee, &month_summary, dec("300000")).unwrap();

        let payroll = new_payroll(&employee.id, month, &month_summary, &salary);

        assert_eq!(payroll.employee_id, "emp_001");
        assert_eq!(payroll.month_year, month);
        assert_eq!(payroll.working_days, 26);
        assert_eq!(payroll.overtime_hours, dec("2"));
        assert_eq!(payroll.allowances, dec("300000"));
        assert_eq!(payroll.gross_salary, salary.gross_salary);
        assert_eq!(payroll.net_salary, salary.net_salary);
        assert_eq!(payroll.total_deductions, salary.total_deductions);
        assert_eq!(payroll.deduction_details.len(), 2);
        assert_eq!(payroll.status, PayrollStatus::Calculated);
    }
}
