//! Combining local and remote vehicle records

use std::cmp::Ordering;
use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use inspekt_types::Result;

use crate::model::{MergedDataset, VehicleRecord, DATE_FIELD, GROUP_FIELD};

/// Merge local and remote records into one dataset.
///
/// Local records come first. Exact duplicates keep their first occurrence,
/// records without an inspection date are dropped, and the rest is stably
/// sorted by group.
pub fn merge_records(local: Vec<VehicleRecord>, remote: Vec<VehicleRecord>) -> MergedDataset {
    let total = local.len() + remote.len();

    let mut seen = HashSet::new();
    let unique: Vec<VehicleRecord> = local
        .into_iter()
        .chain(remote)
        .filter(|record| seen.insert(record.identity_key()))
        .collect();
    let duplicates = total - unique.len();

    let mut records: Vec<VehicleRecord> = unique
        .into_iter()
        .filter(|record| record.contains(DATE_FIELD))
        .collect();
    let undated = total - duplicates - records.len();

    records.sort_by(|a, b| compare_group(a.get(GROUP_FIELD), b.get(GROUP_FIELD)));

    debug!(
        "merged {} records: {} duplicates, {} without {}, {} kept",
        total,
        duplicates,
        undated,
        DATE_FIELD,
        records.len()
    );
    MergedDataset::from_records(records)
}

/// Merge and check that every requested output column exists in the result
pub fn merge_for_columns(
    local: Vec<VehicleRecord>,
    remote: Vec<VehicleRecord>,
    columns: &[String],
) -> Result<MergedDataset> {
    let merged = merge_records(local, remote);
    merged.require_columns(columns)?;
    Ok(merged)
}

/// Numbers sort before text, absent groups sort last
fn compare_group(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            Some(Value::Number(_)) | Some(Value::Bool(_)) => 0,
            Some(Value::String(_)) => 1,
            Some(_) => 2,
            None => 3,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
