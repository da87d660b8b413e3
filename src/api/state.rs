//! Application state for the payslip engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::payslip::{MailTransport, PayslipDispatcher};
use crate::repository::{InMemoryAttendanceStore, InMemoryEmployeeDirectory, InMemoryPayrollStore};
use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service every handler delegates to.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds a service over in-memory stores seeded from the configuration.
    pub async fn from_config(
        config: &ConfigLoader,
        transport: Arc<dyn MailTransport>,
    ) -> EngineResult<Self> {
        let directory = InMemoryEmployeeDirectory::with_employees(config.employees().to_vec());

        let attendance = InMemoryAttendanceStore::new();
        for record in config.attendance() {
            attendance.insert(record.clone()).await?;
        }

        let service = PayrollService::new(
            Arc::new(directory),
            Arc::new(attendance),
            Arc::new(InMemoryPayrollStore::new()),
            PayslipDispatcher::new(transport),
        );
        Ok(Self::new(service))
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
