//! Report Service - the vehicle inspection report use case
//!
//! This service orchestrates the complete workflow:
//! 1. Fetch active vehicles from the fleet API
//! 2. Read the local vehicle list
//! 3. Merge both sets and check the requested columns
//! 4. Resolve label colors through the per-run color cache
//! 5. Render the spreadsheet for today's date

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use inspekt_domain::model::{AnnotatedDataset, ID_FIELD};
use inspekt_domain::repository::{FleetSource, LabelColorSource};
use inspekt_domain::service::{annotate, merge_for_columns, ColorCache, ProgressCallback};
use inspekt_infra::load_vehicles;
use inspekt_types::Result;

use crate::export::{render_report, RenderedReport};

/// Options for one report run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Local `;` separated vehicle list
    pub input: PathBuf,

    /// Directory receiving the spreadsheet
    pub output_dir: PathBuf,

    /// Output columns, identifier first
    pub columns: Vec<String>,

    /// Fill rows by urgency and label cells by label color
    pub colorize: bool,

    /// Reference date for urgency and file name
    pub today: NaiveDate,
}

impl ReportOptions {
    pub fn new(input: PathBuf, today: NaiveDate) -> Self {
        Self {
            input,
            output_dir: PathBuf::from("."),
            columns: requested_columns(&[]),
            colorize: true,
            today,
        }
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_extra_columns(mut self, extra: &[String]) -> Self {
        self.columns = requested_columns(extra);
        self
    }

    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }
}

/// Identifier column followed by the extra columns, without repeats
pub fn requested_columns(extra: &[String]) -> Vec<String> {
    let mut columns = vec![ID_FIELD.to_string()];
    for name in extra {
        let name = name.trim();
        if !name.is_empty() && !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }
    columns
}

/// Runs the merge, enrich and render pipeline against a fleet source.
///
/// The color cache lives as long as the service, i.e. one run.
pub struct ReportService<'a, F, L> {
    fleet: F,
    colors: ColorCache<L>,
    progress: Option<ProgressCallback<'a>>,
}

impl<'a, F: FleetSource, L: LabelColorSource> ReportService<'a, F, L> {
    pub fn new(fleet: F, colors: ColorCache<L>) -> Self {
        Self {
            fleet,
            colors,
            progress: None,
        }
    }

    /// Report label resolution progress as (records done, total)
    pub fn with_progress(mut self, progress: ProgressCallback<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Fetch, read, merge and annotate. `columns` must exist in the merged data.
    pub fn prepare(&mut self, input: &Path, columns: &[String]) -> Result<AnnotatedDataset> {
        let remote = self.fleet.active_vehicles()?;
        let local = load_vehicles(input)?;
        info!(
            "{} local vehicles from {}, {} remote vehicles",
            local.len(),
            input.display(),
            remote.len()
        );

        let merged = merge_for_columns(local, remote, columns)?;
        info!("{} vehicles after merge", merged.len());

        annotate(merged, &mut self.colors, self.progress)
    }

    /// Full run: prepare the dataset and render today's spreadsheet
    pub fn generate(&mut self, options: &ReportOptions) -> Result<RenderedReport> {
        let dataset = self.prepare(&options.input, &options.columns)?;
        render_report(
            &dataset,
            &options.columns,
            options.colorize,
            options.today,
            &options.output_dir,
        )
    }

    pub fn colors(&self) -> &ColorCache<L> {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_columns_order_and_dedup() {
        let extra = vec![
            "kurzname".to_string(),
            "rnr".to_string(),
            "labelIds".to_string(),
            "kurzname".to_string(),
            " ".to_string(),
        ];
        assert_eq!(
            requested_columns(&extra),
            vec!["rnr".to_string(), "kurzname".to_string(), "labelIds".to_string()]
        );
        assert_eq!(requested_columns(&[]), vec!["rnr".to_string()]);
    }

    #[test]
    fn test_options_builder() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let options = ReportOptions::new(PathBuf::from("vehicles.csv"), today)
            .with_extra_columns(&["hu".to_string()])
            .with_colorize(false)
            .with_output_dir(PathBuf::from("out"));
        assert_eq!(options.columns, vec!["rnr".to_string(), "hu".to_string()]);
        assert!(!options.colorize);
        assert_eq!(options.output_dir, PathBuf::from("out"));
    }
}
