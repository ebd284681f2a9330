//! Output formatting module

use std::path::Path;

use inspekt_app::export::RenderedReport;
use inspekt_domain::model::{AnnotatedDataset, UrgencyTier};
use inspekt_types::{OutputFormat, Result};

pub fn output_report(output_format: OutputFormat, report: &RenderedReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(report)?;
        println!("{}", content);
    } else {
        println!("\nInspection Report");
        println!("=================");
        println!("File:     {}", report.path.display());
        println!("Vehicles: {}", report.rows);
        println!("Columns:  {}", report.columns.join(", "));
        println!("Colored:  {}", if report.colorized { "Yes" } else { "No" });

        println!("\n--- Due dates ---");
        for tier in UrgencyTier::ALL {
            let count = report.tiers.get(&tier).copied().unwrap_or(0);
            println!("{:<9} {:>5}", tier.label(), count);
        }
    }

    Ok(())
}

/// Write the merged dataset to `output`, or stdout
pub fn output_merge(dataset: &AnnotatedDataset, output: Option<&Path>) -> Result<()> {
    let content = serde_json::to_string_pretty(&dataset.to_json())?;
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("Wrote {} vehicles to {}", dataset.len(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
