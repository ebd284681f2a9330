//! Label color enrichment of merged records

use serde_json::Value;
use tracing::debug;

use inspekt_types::Result;

use super::color_cache::ColorCache;
use crate::model::{
    AnnotatedDataset, AnnotatedRecord, ColorCodeAnnotation, MergedDataset, VehicleRecord,
    LABEL_FIELD,
};
use crate::repository::LabelColorSource;

/// Progress callback: (records done, records total)
pub type ProgressCallback<'a> = &'a dyn Fn(usize, usize);

const IGNORED_TOKENS: [&str; 3] = ["None", "nan", "null"];

/// Label ids of a record in their original order
pub fn label_ids(record: &VehicleRecord) -> Vec<String> {
    let raw = match record.get(LABEL_FIELD) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        _ => return Vec::new(),
    };

    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty() && !IGNORED_TOKENS.contains(id))
        .map(str::to_string)
        .collect()
}

/// Resolve the color of every label of every record, keeping dataset order
pub fn annotate<S: LabelColorSource>(
    dataset: MergedDataset,
    colors: &mut ColorCache<S>,
    progress: Option<ProgressCallback<'_>>,
) -> Result<AnnotatedDataset> {
    let columns = dataset.columns().to_vec();
    let records = dataset.into_records();
    let total = records.len();

    let mut annotated = Vec::with_capacity(total);
    for (idx, record) in records.into_iter().enumerate() {
        let codes = label_ids(&record)
            .iter()
            .map(|id| colors.get_color(id))
            .collect::<Result<Vec<String>>>()?;
        annotated.push(AnnotatedRecord {
            record,
            color_codes: ColorCodeAnnotation::new(codes),
        });
        if let Some(cb) = progress {
            cb(idx + 1, total);
        }
    }

    debug!(
        "annotated {} records, {} labels cached",
        annotated.len(),
        colors.cached_labels()
    );
    Ok(AnnotatedDataset {
        records: annotated,
        columns,
    })
}
