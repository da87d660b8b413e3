//! Configuration loading for the payslip engine.
//!
//! This module loads service settings and the employee/attendance seed data
//! from a directory of YAML files. Regulatory rates are constants in
//! [`calculation`](crate::calculation), not configuration.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Sending payslips as {}", config.service().mail.from_email);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceFile, EmployeesConfig, MailConfig, PayrollConfig, ServerConfig, ServiceConfig,
};
