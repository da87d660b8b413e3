use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::models::{AttendanceRecord, Employee, MonthYear, Payroll};

use super::{AttendanceSource, EmployeeDirectory, PayrollStore, StoreError};

/// A thread-safe in-memory employee directory.
#[derive(Default, Clone)]
pub struct InMemoryEmployeeDirectory {
    employees: Arc<RwLock<HashMap<String, Employee>>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates a new, empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given employees, keyed by id.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let employees = employees.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            employees: Arc::new(RwLock::new(employees)),
        }
    }

    /// Inserts or replaces an employee.
    pub async fn upsert(&self, employee: Employee) {
        self.employees
            .write()
            .await
            .insert(employee.id.clone(), employee);
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.read().await.get(employee_id).cloned())
    }
}

/// A thread-safe in-memory attendance store.
///
/// Records are keyed by (employee, date), so a second record for the same
/// day is rejected rather than stored.
#[derive(Default, Clone)]
pub struct InMemoryAttendanceStore {
    records: Arc<RwLock<BTreeMap<(String, NaiveDate), AttendanceRecord>>>,
}

impl InMemoryAttendanceStore {
    /// Creates a new, empty attendance store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, failing with [`StoreError::Conflict`] if the employee
    /// already has one for that date.
    pub async fn insert(&self, record: AttendanceRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let key = (record.employee_id.clone(), record.work_date);
        if records.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        records.insert(key, record);
        Ok(())
    }
}

#[async_trait]
impl AttendanceSource for InMemoryAttendanceStore {
    async fn list_records(
        &self,
        employee_id: &str,
        month: MonthYear,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = self.records.read().await;
        let from = (employee_id.to_string(), month.first_day());
        let to = (employee_id.to_string(), month.last_day());
        Ok(records.range(from..=to).map(|(_, r)| r.clone()).collect())
    }
}

/// A thread-safe in-memory payroll store enforcing one payroll per
/// (employee, month).
#[derive(Default, Clone)]
pub struct InMemoryPayrollStore {
    payrolls: Arc<RwLock<HashMap<(String, MonthYear), Payroll>>>,
}

impl InMemoryPayrollStore {
    /// Creates a new, empty payroll store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payrolls.
    pub async fn len(&self) -> usize {
        self.payrolls.read().await.len()
    }

    /// Returns true if no payroll is stored.
    pub async fn is_empty(&self) -> bool {
        self.payrolls.read().await.is_empty()
    }
}

#[async_trait]
impl PayrollStore for InMemoryPayrollStore {
    async fn save(&self, payroll: Payroll) -> Result<Payroll, StoreError> {
        let mut payrolls = self.payrolls.write().await;
        match payrolls.entry((payroll.employee_id.clone(), payroll.month_year)) {
            Entry::Occupied(_) => Err(StoreError::Conflict),
            Entry::Vacant(slot) => Ok(slot.insert(payroll).clone()),
        }
    }

    async fn find_by_employee_and_month(
        &self,
        employee_id: &str,
        month: MonthYear,
    ) -> Result<Option<Payroll>, StoreError> {
        let payrolls = self.payrolls.read().await;
        Ok(payrolls.get(&(employee_id.to_string(), month)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveType, PayrollStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: "Nguyen Van An".to_string(),
            position: "Engineer".to_string(),
            base_salary: Decimal::from(10_000_000),
            bank_account: String::new(),
            join_date: day(1, 1),
            dependents: 0,
        }
    }

    fn payroll(employee_id: &str, month: MonthYear) -> Payroll {
        Payroll {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            month_year: month,
            working_days: 26,
            overtime_hours: Decimal::ZERO,
            leave_days: 0,
            basic_salary: Decimal::from(10_000_000),
            allowances: Decimal::ZERO,
            gross_salary: Decimal::from(10_000_000),
            total_deductions: Decimal::from(1_050_000),
            net_salary: Decimal::from(8_950_000),
            deduction_details: vec![],
            status: PayrollStatus::Calculated,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_employee_directory_lookup() {
        let directory = InMemoryEmployeeDirectory::with_employees([employee("emp_001")]);
        directory.upsert(employee("emp_002")).await;

        assert_eq!(
            directory.get_employee("emp_001").await.unwrap().unwrap().id,
            "emp_001"
        );
        assert!(directory.get_employee("emp_002").await.unwrap().is_some());
        assert!(directory.get_employee("emp_404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_attendance_rejects_duplicate_day() {
        let store = InMemoryAttendanceStore::new();
        store
            .insert(AttendanceRecord::worked("emp_001", day(1, 5), Decimal::ZERO))
            .await
            .unwrap();

        let duplicate = AttendanceRecord::leave("emp_001", day(1, 5), LeaveType::Sick);
        assert_eq!(store.insert(duplicate).await, Err(StoreError::Conflict));

        // Same day, other employee is fine
        store
            .insert(AttendanceRecord::worked("emp_002", day(1, 5), Decimal::ZERO))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_attendance_lists_one_employee_month() {
        let store = InMemoryAttendanceStore::new();
        for record in [
            AttendanceRecord::worked("emp_001", day(1, 1), Decimal::ZERO),
            AttendanceRecord::worked("emp_001", day(1, 31), Decimal::ONE),
            AttendanceRecord::worked("emp_001", day(2, 1), Decimal::ZERO),
            AttendanceRecord::worked("emp_0010", day(1, 15), Decimal::ZERO),
            AttendanceRecord::worked("emp_002", day(1, 15), Decimal::ZERO),
        ] {
            store.insert(record).await.unwrap();
        }

        let january = MonthYear::new(2026, 1).unwrap();
        let records = store.list_records("emp_001", january).await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.employee_id == "emp_001"));
        assert_eq!(records[0].work_date, day(1, 1));
        assert_eq!(records[1].work_date, day(1, 31));
    }

    #[tokio::test]
    async fn test_payroll_save_then_find() {
        let store = InMemoryPayrollStore::new();
        let january = MonthYear::new(2026, 1).unwrap();
        let saved = store.save(payroll("emp_001", january)).await.unwrap();

        let found = store
            .find_by_employee_and_month("emp_001", january)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, saved);

        let february = MonthYear::new(2026, 2).unwrap();
        assert!(
            store
                .find_by_employee_and_month("emp_001", february)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_payroll_save_rejects_second_record_for_month() {
        let store = InMemoryPayrollStore::new();
        let january = MonthYear::new(2026, 1).unwrap();
        let first = store.save(payroll("emp_001", january)).await.unwrap();

        assert_eq!(
            store.save(payroll("emp_001", january)).await,
            Err(StoreError::Conflict)
        );
        assert_eq!(store.len().await, 1);

        // The original record is untouched
        let stored = store
            .find_by_employee_and_month("emp_001", january)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, first.id);
    }

    #[tokio::test]
    async fn test_concurrent_saves_create_exactly_one_record() {
        let store = InMemoryPayrollStore::new();
        let january = MonthYear::new(2026, 1).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.save(payroll("emp_001", january)).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(StoreError::Conflict) => conflicts += 1,
                Err(other) => panic!("unexpected error {:?}", other),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(store.len().await, 1);
    }
}
