//! CSV loader for the local vehicle list
//!
//! The file is `;` separated with a header row. Cells are typed the way a
//! data-frame reader types them, so that local rows compare equal to the
//! same vehicle delivered by the fleet API.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::{debug, warn};

use inspekt_domain::model::VehicleRecord;

#[derive(Error, Debug)]
pub enum CsvLoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("CSV file has no header row")]
    Empty,
}

impl From<CsvLoaderError> for inspekt_types::Error {
    fn from(err: CsvLoaderError) -> Self {
        match err {
            CsvLoaderError::IoError(e) => inspekt_types::Error::Io(e),
            other => inspekt_types::Error::CsvLoader(other.to_string()),
        }
    }
}

/// Load vehicles from a `;` separated file
pub fn load_vehicles<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleRecord>, CsvLoaderError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let vehicles = parse_vehicles(&bytes)?;
    debug!("loaded {} vehicles from {}", vehicles.len(), path.display());
    Ok(vehicles)
}

/// Parse vehicles from raw file content
pub fn parse_vehicles(bytes: &[u8]) -> Result<Vec<VehicleRecord>, CsvLoaderError> {
    let text = decode(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(CsvLoaderError::Empty);
    }

    let mut vehicles = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut record = VehicleRecord::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            if name.is_empty() {
                continue;
            }
            record.insert(name, parse_cell(cell));
        }
        vehicles.push(record);
    }

    Ok(vehicles)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }
    warn!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

fn parse_cell(cell: &str) -> Value {
    let cell = cell.trim();
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = cell.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    match cell {
        "true" | "True" | "TRUE" => Value::Bool(true),
        "false" | "False" | "FALSE" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}
