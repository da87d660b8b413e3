//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading service
//! settings and seed data from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee};

use super::types::{AttendanceFile, EmployeesConfig, PayrollConfig, ServiceConfig};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// validates the seed data before anything is served from it.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── service.yaml        # Server and mail sender settings
/// ├── employees.yaml      # Employee directory seed
/// └── attendance/
///     └── 2026-01.yaml    # Attendance records, any number of files
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// println!("Listening on {}", loader.service().server.bind_address);
/// println!("{} employees", loader.employees().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `service.yaml` or `employees.yaml` is missing
    /// - Any file contains invalid YAML or is missing a required field
    /// - An employee fails validation or appears twice
    /// - Two attendance records share an employee and date
    ///
    /// A missing `attendance/` directory means there are no records.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let service = Self::load_yaml::<ServiceConfig>(&path.join("service.yaml"))?;

        let employees_path = path.join("employees.yaml");
        let employees = Self::load_yaml::<EmployeesConfig>(&employees_path)?.employees;
        Self::validate_employees(&employees_path, &employees)?;

        let attendance = Self::load_attendance(&path.join("attendance"))?;

        Ok(Self {
            config: PayrollConfig::new(service, employees, attendance),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_employees(path: &Path, employees: &[Employee]) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for employee in employees {
            employee.validate()?;
            if !seen.insert(employee.id.as_str()) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate employee id '{}'", employee.id),
                });
            }
        }
        Ok(())
    }

    /// Loads every `.yaml` file in the attendance directory, in file name order.
    fn load_attendance(dir: &Path) -> EngineResult<Vec<AttendanceRecord>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let dir_str = dir.display().to_string();
        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        files.sort();

        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();
        let mut records = Vec::new();
        for file in files {
            for record in Self::load_yaml::<AttendanceFile>(&file)?.records {
                if !seen.insert((record.employee_id.clone(), record.work_date)) {
                    return Err(EngineError::ConfigParseError {
                        path: file.display().to_string(),
                        message: format!(
                            "duplicate attendance record for employee '{}' on {}",
                            record.employee_id, record.work_date
                        ),
                    });
                }
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Returns the service settings.
    pub fn service(&self) -> &ServiceConfig {
        self.config.service()
    }

    /// Returns the employee directory seed.
    pub fn employees(&self) -> &[Employee] {
        self.config.employees()
    }

    /// Returns every attendance record.
    pub fn attendance(&self) -> &[AttendanceRecord] {
        self.config.attendance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/payroll"
    }

    const SERVICE_YAML: &str = "\
server:
  bind_address: \"127.0.0.1:0\"
mail:
  from_email: hr@example.com
  from_name: HR Team
  outbox_dir: ./outbox
";

    const EMPLOYEES_YAML: &str = "\
employees:
  - id: emp_001
    name: Nguyen Van An
    base_salary: \"10000000\"
    join_date: 2023-06-01
";

    /// Writes a config directory with the given files into a temp dir.
    fn write_config(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path: PathBuf = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.service().mail.from_name, "HR Team");
        assert_eq!(loader.employees().len(), 4);
        assert!(!loader.attendance().is_empty());
    }

    #[test]
    fn test_seed_employees_have_expected_fields() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let employee = loader
            .employees()
            .iter()
            .find(|e| e.id == "emp_002")
            .unwrap();

        assert_eq!(employee.base_salary, Decimal::from(30_000_000));
        assert_eq!(employee.dependents, 1);
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        match ConfigLoader::load("./nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("service.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_employees_file_returns_config_not_found() {
        let dir = write_config(&[("service.yaml", SERVICE_YAML)]);
        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("employees.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_attendance_directory_means_no_records() {
        let dir = write_config(&[
            ("service.yaml", SERVICE_YAML),
            ("employees.yaml", EMPLOYEES_YAML),
        ]);
        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(loader.employees().len(), 1);
        assert!(loader.attendance().is_empty());
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = write_config(&[("service.yaml", "server: [unclosed")]);
        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("service.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_base_salary_is_rejected() {
        let employees = EMPLOYEES_YAML.replace("\"10000000\"", "\"0\"");
        let dir = write_config(&[
            ("service.yaml", SERVICE_YAML),
            ("employees.yaml", employees.as_str()),
        ]);
        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EngineError::InvalidEmployee { .. })
        ));
    }

    #[test]
    fn test_duplicate_employee_id_is_rejected() {
        let employees = format!(
            "{}{}",
            EMPLOYEES_YAML,
            "  - id: emp_001\n    name: Someone Else\n    base_salary: \"5000000\"\n    join_date: 2024-01-01\n"
        );
        let dir = write_config(&[
            ("service.yaml", SERVICE_YAML),
            ("employees.yaml", employees.as_str()),
        ]);
        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("duplicate employee id 'emp_001'"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_attendance_across_files_is_rejected() {
        let record = "records:\n  - employee_id: emp_001\n    work_date: 2026-01-05\n";
        let dir = write_config(&[
            ("service.yaml", SERVICE_YAML),
            ("employees.yaml", EMPLOYEES_YAML),
            ("attendance/a.yaml", record),
            ("attendance/b.yaml", record),
        ]);
        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("b.yaml"));
                assert!(message.contains("emp_001"));
                assert!(message.contains("2026-01-05"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_attendance_defaults_apply() {
        let record = "records:\n  - employee_id: emp_001\n    work_date: 2026-01-05\n";
        let dir = write_config(&[
            ("service.yaml", SERVICE_YAML),
            ("employees.yaml", EMPLOYEES_YAML),
            ("attendance/2026-01.yaml", record),
            ("attendance/notes.txt", "ignored"),
        ]);
        let loader = ConfigLoader::load(dir.path()).unwrap();
        let records = loader.attendance();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hours_worked, Decimal::from(8));
        assert_eq!(records[0].overtime_hours, Decimal::ZERO);
        assert!(!records[0].is_leave);
    }
}
