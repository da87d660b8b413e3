//! Monthly payroll and payslip engine.
//!
//! This crate turns daily attendance into a monthly payroll: it aggregates
//! working, overtime and leave days, derives gross salary, withholds social
//! insurance and progressive income tax, and renders the result as a PDF
//! payslip that can be downloaded or emailed.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payslip;
pub mod repository;
pub mod service;
