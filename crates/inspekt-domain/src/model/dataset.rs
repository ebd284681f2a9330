//! Merged and annotated record sets

use serde_json::Value;

use inspekt_types::{Error, Result};

use super::vehicle_record::VehicleRecord;

/// Deduplicated, date-filtered and group-sorted vehicle records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedDataset {
    records: Vec<VehicleRecord>,
    columns: Vec<String>,
}

impl MergedDataset {
    /// Wrap records that already satisfy the merge invariants
    pub(crate) fn from_records(records: Vec<VehicleRecord>) -> Self {
        let columns = union_of_columns(&records);
        Self { records, columns }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VehicleRecord> {
        self.records
    }

    /// Union of field names across all records, in first-seen order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Fail with a validation error naming every requested column that no
    /// record carries
    pub fn require_columns(&self, requested: &[String]) -> Result<()> {
        let missing: Vec<String> = requested
            .iter()
            .filter(|c| !self.has_column(c))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation { missing })
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn union_of_columns(records: &[VehicleRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Color codes for a record's labels, one per label id in original order.
/// An entry is empty when the label has no color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCodeAnnotation(Vec<String>);

impl ColorCodeAnnotation {
    pub fn new(codes: Vec<String>) -> Self {
        Self(codes)
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color of the first label, if that label has one
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str).filter(|c| !c.is_empty())
    }
}

/// A merged record together with its resolved label colors
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    pub record: VehicleRecord,
    pub color_codes: ColorCodeAnnotation,
}

impl AnnotatedRecord {
    /// JSON object of the record fields plus a `colorCodes` array
    pub fn to_json(&self) -> Value {
        let mut object = self.record.to_json_object();
        let codes = self
            .color_codes
            .codes()
            .iter()
            .cloned()
            .map(Value::String)
            .collect();
        object.insert("colorCodes".to_string(), Value::Array(codes));
        Value::Object(object)
    }
}

/// Merged dataset after label enrichment, in merged order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotatedDataset {
    pub records: Vec<AnnotatedRecord>,
    pub columns: Vec<String>,
}

impl AnnotatedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.records.iter().map(AnnotatedRecord::to_json).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> MergedDataset {
        MergedDataset::from_records(vec![
            VehicleRecord::new().with("rnr", "A").with("hu", "2024-01-01"),
            VehicleRecord::new()
                .with("rnr", "B")
                .with("hu", "2024-01-01")
                .with("kurzname", "Bagger"),
        ])
    }

    #[test]
    fn test_columns_are_union() {
        let ds = dataset();
        assert!(ds.has_column("kurzname"));
        assert!(ds.has_column("rnr"));
        assert_eq!(ds.columns().len(), 3);
    }

    #[test]
    fn test_require_columns_names_missing() {
        let ds = dataset();
        let requested = vec!["rnr".to_string(), "fuel".to_string(), "kurzname".to_string()];
        match ds.require_columns(&requested) {
            Err(Error::Validation { missing }) => assert_eq!(missing, vec!["fuel".to_string()]),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_primary_color_skips_empty_first() {
        let annotation = ColorCodeAnnotation::new(vec![String::new(), "#ff0000".to_string()]);
        assert_eq!(annotation.primary(), None);
        let annotation = ColorCodeAnnotation::new(vec!["#00ff00".to_string()]);
        assert_eq!(annotation.primary(), Some("#00ff00"));
        assert_eq!(ColorCodeAnnotation::default().primary(), None);
    }

    #[test]
    fn test_annotated_json_has_color_codes() {
        let annotated = AnnotatedRecord {
            record: VehicleRecord::new().with("rnr", "A"),
            color_codes: ColorCodeAnnotation::new(vec!["#123456".to_string()]),
        };
        let json = annotated.to_json();
        assert_eq!(json["rnr"], "A");
        assert_eq!(json["colorCodes"][0], "#123456");
    }
}
