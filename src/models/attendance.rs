//! Attendance models.
//!
//! This module contains the [`AttendanceRecord`] type supplied by the
//! attendance storage collaborator and the derived [`MonthlySummary`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of leave taken on a leave day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid annual leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Unpaid leave.
    Unpaid,
    /// Any other leave category.
    Other,
}

fn default_hours_worked() -> Decimal {
    Decimal::from(8)
}

/// One employee's attendance on one calendar day.
///
/// At most one record exists per (employee, date); the attendance store is
/// responsible for rejecting duplicates.
///
/// # Example
///
/// ```
/// use payslip_engine::models::AttendanceRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord::worked(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     Decimal::from(2),
/// );
/// assert!(!record.is_leave);
/// assert_eq!(record.hours_worked, Decimal::from(8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar day, in the employee's local calendar.
    pub work_date: NaiveDate,
    /// Ordinary hours worked.
    #[serde(default = "default_hours_worked")]
    pub hours_worked: Decimal,
    /// Overtime hours on top of the ordinary hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Whether the day was taken as leave.
    #[serde(default)]
    pub is_leave: bool,
    /// The leave category, present on leave days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
}

impl AttendanceRecord {
    /// A standard 8-hour working day with the given overtime.
    pub fn worked(employee_id: &str, work_date: NaiveDate, overtime_hours: Decimal) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            work_date,
            hours_worked: default_hours_worked(),
            overtime_hours,
            is_leave: false,
            leave_type: None,
            note: String::new(),
        }
    }

    /// A leave day of the given type.
    pub fn leave(employee_id: &str, work_date: NaiveDate, leave_type: LeaveType) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            work_date,
            hours_worked: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            is_leave: true,
            leave_type: Some(leave_type),
            note: String::new(),
        }
    }
}

/// Monthly attendance totals for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Days worked (records without the leave flag).
    pub working_days: u32,
    /// Overtime hours accumulated over working days.
    pub overtime_hours: Decimal,
    /// Days taken as leave.
    pub leave_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_applies_defaults() {
        let yaml = r#"
employee_id: emp_001
work_date: 2026-01-05
"#;
        let record: AttendanceRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.hours_worked, Decimal::from(8));
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert!(!record.is_leave);
        assert_eq!(record.leave_type, None);
    }

    #[test]
    fn test_deserialize_leave_record() {
        let json = r#"{
            "employee_id": "emp_003",
            "work_date": "2026-01-12",
            "hours_worked": "0",
            "is_leave": true,
            "leave_type": "sick",
            "note": "flu"
        }"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_leave);
        assert_eq!(record.leave_type, Some(LeaveType::Sick));
        assert_eq!(record.note, "flu");
    }

    #[test]
    fn test_leave_constructor() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        let record = AttendanceRecord::leave("emp_003", date, LeaveType::Annual);
        assert!(record.is_leave);
        assert_eq!(record.hours_worked, Decimal::ZERO);
        assert_eq!(record.leave_type, Some(LeaveType::Annual));
    }

    #[test]
    fn test_leave_type_serialization() {
        assert_eq!(serde_json::to_string(&LeaveType::Unpaid).unwrap(), "\"unpaid\"");
    }
}
