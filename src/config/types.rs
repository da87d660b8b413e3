//! Configuration types for the payslip engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::path::PathBuf;

use serde::Deserialize;

use crate::models::{AttendanceRecord, Employee};

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

/// Outbound mail settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Sender address on payslip emails.
    pub from_email: String,
    /// Sender display name on payslip emails.
    pub from_name: String,
    /// Directory the outbox transport writes queued messages into.
    pub outbox_dir: PathBuf,
}

/// The `service.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Outbound mail settings.
    pub mail: MailConfig,
}

/// The `employees.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// The employee directory seed.
    pub employees: Vec<Employee>,
}

/// The structure of one file under `attendance/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceFile {
    /// Daily attendance records.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
}

/// Complete, validated configuration.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    service: ServiceConfig,
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
}

impl PayrollConfig {
    /// Creates a new payroll configuration.
    pub fn new(
        service: ServiceConfig,
        employees: Vec<Employee>,
        attendance: Vec<AttendanceRecord>,
    ) -> Self {
        Self {
            service,
            employees,
            attendance,
        }
    }

    /// Returns the service settings.
    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    /// Returns the employee directory seed.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns every attendance record, in file then record order.
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }
}
