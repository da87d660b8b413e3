//! The payroll service.
//!
//! [`PayrollService`] ties the pure calculation functions to the storage and
//! mail collaborators. It exposes the three operations the routing layer
//! calls: calculate a month's payroll, export its payslip, and email it.
//! Month-years arrive as `YYYY-MM` strings at this boundary.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{calculate_salary, new_payroll, summarize_month};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, MonthYear, Payroll};
use crate::payslip::{PayslipDispatcher, render_payslip};
use crate::repository::{AttendanceSource, EmployeeDirectory, PayrollStore, StoreError};

/// A rendered payslip ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPayslip {
    /// Suggested download name, `payslip_{employee_id}_{YYYY-MM}.pdf`.
    pub file_name: String,
    /// The PDF bytes.
    pub content: Vec<u8>,
}

/// Orchestrates payroll calculation and payslip delivery.
#[derive(Clone)]
pub struct PayrollService {
    employees: Arc<dyn EmployeeDirectory>,
    attendance: Arc<dyn AttendanceSource>,
    payrolls: Arc<dyn PayrollStore>,
    dispatcher: PayslipDispatcher,
}

impl PayrollService {
    /// Creates a service over the given collaborators.
    pub fn new(
        employees: Arc<dyn EmployeeDirectory>,
        attendance: Arc<dyn AttendanceSource>,
        payrolls: Arc<dyn PayrollStore>,
        dispatcher: PayslipDispatcher,
    ) -> Self {
        Self {
            employees,
            attendance,
            payrolls,
            dispatcher,
        }
    }

    /// Calculates and stores the payroll for an employee and month.
    ///
    /// The store's create-if-absent is the only durable side effect: on any
    /// error nothing is written.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidMonthFormat`] if `month_year` is not `YYYY-MM`
    /// - [`EngineError::EmployeeNotFound`] if the employee is unknown
    /// - [`EngineError::NoAttendanceData`] if the month has no attendance
    /// - [`EngineError::InvalidEmployee`] / [`EngineError::InvalidAllowances`]
    ///   for invalid inputs
    /// - [`EngineError::SalaryOverflow`] if the figures exceed the decimal range
    /// - [`EngineError::DuplicatePayroll`] if the month is already calculated
    pub async fn calculate_payroll(
        &self,
        employee_id: &str,
        month_year: &str,
        allowances: Decimal,
    ) -> EngineResult<Payroll> {
        let result = self.try_calculate(employee_id, month_year, allowances).await;
        match &result {
            Ok(payroll) => info!(
                employee_id = %employee_id,
                month_year = %payroll.month_year,
                payroll_id = %payroll.id,
                gross_salary = %payroll.gross_salary,
                net_salary = %payroll.net_salary,
                "Payroll calculated"
            ),
            Err(error) => warn!(
                employee_id = %employee_id,
                month_year = %month_year,
                error = %error,
                "Payroll calculation failed"
            ),
        }
        result
    }

    async fn try_calculate(
        &self,
        employee_id: &str,
        month_year: &str,
        allowances: Decimal,
    ) -> EngineResult<Payroll> {
        let month = MonthYear::from_str(month_year)?;
        let employee = self.employee(employee_id).await?;

        let records = self.attendance.list_records(employee_id, month).await?;
        let summary = summarize_month(employee_id, month, &records)?;
        let salary = calculate_salary(&employee, &summary, allowances)?;

        let payroll = new_payroll(employee_id, month, &summary, &salary);
        self.payrolls.save(payroll).await.map_err(|e| match e {
            StoreError::Conflict => EngineError::DuplicatePayroll {
                employee_id: employee_id.to_string(),
                month,
            },
            other => other.into(),
        })
    }

    /// Renders the stored payroll for an employee and month as a PDF payslip.
    ///
    /// Figures come from the stored record; nothing is recalculated except
    /// the overtime line, which is derived from stored hours.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidMonthFormat`] if `month_year` is not `YYYY-MM`
    /// - [`EngineError::PayrollNotFound`] if the month was never calculated
    /// - [`EngineError::EmployeeNotFound`] if the employee has since vanished
    /// - [`EngineError::RenderFailure`] if the document cannot be written
    pub async fn export_payslip(
        &self,
        employee_id: &str,
        month_year: &str,
    ) -> EngineResult<RenderedPayslip> {
        let result = self.render(employee_id, month_year).await;
        match &result {
            Ok((_, payslip)) => info!(
                employee_id = %employee_id,
                month_year = %month_year,
                bytes = payslip.content.len(),
                "Payslip exported"
            ),
            Err(error) => warn!(
                employee_id = %employee_id,
                month_year = %month_year,
                error = %error,
                "Payslip export failed"
            ),
        }
        result.map(|(_, payslip)| payslip)
    }

    /// Renders the payslip and emails it to `to_email`.
    ///
    /// # Errors
    ///
    /// Everything [`export_payslip`](Self::export_payslip) returns, plus
    /// [`EngineError::DeliveryFailed`] if the transport fails.
    pub async fn send_payslip(
        &self,
        employee_id: &str,
        month_year: &str,
        to_email: &str,
    ) -> EngineResult<()> {
        let result = self.try_send(employee_id, month_year, to_email).await;
        match &result {
            Ok(()) => info!(
                employee_id = %employee_id,
                month_year = %month_year,
                recipient = %to_email,
                "Payslip sent"
            ),
            Err(error) => warn!(
                employee_id = %employee_id,
                month_year = %month_year,
                recipient = %to_email,
                error = %error,
                "Payslip delivery failed"
            ),
        }
        result
    }

    async fn try_send(&self, employee_id: &str, month_year: &str, to_email: &str) -> EngineResult<()> {
        let (employee, payslip) = self.render(employee_id, month_year).await?;
        let month = MonthYear::from_str(month_year)?;
        self.dispatcher
            .dispatch(payslip.content, to_email, &employee.name, month)
            .await
    }

    async fn render(
        &self,
        employee_id: &str,
        month_year: &str,
    ) -> EngineResult<(Employee, RenderedPayslip)> {
        let month = MonthYear::from_str(month_year)?;
        let payroll = self
            .payrolls
            .find_by_employee_and_month(employee_id, month)
            .await?
            .ok_or_else(|| EngineError::PayrollNotFound {
                employee_id: employee_id.to_string(),
                month,
            })?;
        let employee = self.employee(employee_id).await?;

        let content = render_payslip(&payroll, &employee, generation_time())?;
        let payslip = RenderedPayslip {
            file_name: format!("payslip_{}_{}.pdf", employee_id, month),
            content,
        };
        Ok((employee, payslip))
    }

    async fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

fn generation_time() -> NaiveDateTime {
    Local::now().naive_local()
}
