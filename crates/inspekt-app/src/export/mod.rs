//! Spreadsheet report rendering

mod excel;
mod layout;

pub use excel::write_workbook;
pub use layout::{
    build_sheet, parse_color, tier_fill, CellStyle, ReportCell, ReportRow, ReportSheet,
};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use inspekt_domain::model::{AnnotatedDataset, UrgencyTier};
use inspekt_types::Result;

use crate::constants::REPORT_FILE_PREFIX;

/// Outcome of a rendered report
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub colorized: bool,
    pub tiers: BTreeMap<UrgencyTier, usize>,
}

/// `vehicles_<YYYY-MM-DD>.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{}_{}.xlsx", REPORT_FILE_PREFIX, date.format("%Y-%m-%d"))
}

/// Render the dataset into today's report file inside `output_dir`.
///
/// An existing report for the same date is removed first, so a failed
/// render leaves no file behind.
pub fn render_report(
    dataset: &AnnotatedDataset,
    columns: &[String],
    colorize: bool,
    today: NaiveDate,
    output_dir: &Path,
) -> Result<RenderedReport> {
    let path = output_dir.join(report_file_name(today));
    if path.exists() {
        info!("removing previous report {}", path.display());
        std::fs::remove_file(&path)?;
    }

    let sheet = build_sheet(dataset, columns, colorize, today)?;
    write_workbook(&sheet, &path)?;
    info!("wrote {} rows to {}", sheet.rows.len(), path.display());

    Ok(RenderedReport {
        path,
        rows: sheet.rows.len(),
        columns: columns.to_vec(),
        colorized: colorize,
        tiers: sheet.tier_counts(),
    })
}
