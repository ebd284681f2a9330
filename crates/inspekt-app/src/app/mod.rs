//! Use cases

pub mod report_service;

pub use report_service::{requested_columns, ReportOptions, ReportService};
