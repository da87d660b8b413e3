//! Monthly attendance aggregation.
//!
//! Reduces daily [`AttendanceRecord`]s for one employee into the
//! [`MonthlySummary`] payroll is calculated from.

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, MonthYear, MonthlySummary};

/// Classifies an employee's attendance records for one month.
///
/// Only records belonging to `employee_id` and dated within `month` are
/// counted; anything else in `records` is ignored. Each leave-flagged record
/// adds a leave day. Every other record adds a working day and its overtime
/// hours.
///
/// # Errors
///
/// Returns [`EngineError::NoAttendanceData`] when no working or leave day was
/// found, since payroll cannot be calculated from an empty month.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::summarize_month;
/// use payslip_engine::models::{AttendanceRecord, LeaveType, MonthYear};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
/// let records = vec![
///     AttendanceRecord::worked("emp_001", day(5), Decimal::from(2)),
///     AttendanceRecord::worked("emp_001", day(6), Decimal::ZERO),
///     AttendanceRecord::leave("emp_001", day(7), LeaveType::Annual),
/// ];
///
/// let month = MonthYear::new(2026, 1).unwrap();
/// let summary = summarize_month("emp_001", month, &records).unwrap();
/// assert_eq!(summary.working_days, 2);
/// assert_eq!(summary.overtime_hours, Decimal::from(2));
/// assert_eq!(summary.leave_days, 1);
/// ```
pub fn summarize_month(
    employee_id: &str,
    month: MonthYear,
    records: &[AttendanceRecord],
) -> EngineResult<MonthlySummary> {
    let summary = records
        .iter()
        .filter(|r| r.employee_id == employee_id && month.contains(r.work_date))
        .fold(MonthlySummary::default(), |mut acc, record| {
            if record.is_leave {
                acc.leave_days += 1;
            } else {
                acc.working_days += 1;
                acc.overtime_hours += record.overtime_hours;
            }
            acc
        });

    if summary.working_days + summary.leave_days == 0 {
        return Err(EngineError::NoAttendanceData {
            employee_id: employee_id.to_string(),
            month,
        });
    }

    Ok(summary)
}
