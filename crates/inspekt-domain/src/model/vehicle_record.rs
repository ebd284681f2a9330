//! Vehicle record type definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Vehicle identifier (always part of the report)
pub const ID_FIELD: &str = "rnr";
/// Group field used for sort order
pub const GROUP_FIELD: &str = "gruppe";
/// Inspection due date (Hauptuntersuchung)
pub const DATE_FIELD: &str = "hu";
/// Comma separated label identifiers
pub const LABEL_FIELD: &str = "labelIds";
/// Format of the inspection due date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One vehicle: named scalar fields.
///
/// Null values are never stored, so a field set to null and a field that is
/// absent compare equal. Records from sources with different column sets
/// can therefore be compared on their full field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, Value>")]
pub struct VehicleRecord {
    fields: BTreeMap<String, Value>,
}

impl VehicleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object as returned by the fleet API
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (name, value) in object {
            record.insert(name, value);
        }
        record
    }

    /// Set a field. Setting null removes it.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if value.is_null() {
            self.fields.remove(&name);
        } else {
            self.fields.insert(name, value);
        }
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Cell text of a field, empty for absent fields
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(cell_text).unwrap_or_default()
    }

    /// Canonical form of the full field set, used for duplicate detection
    pub fn identity_key(&self) -> String {
        // BTreeMap keeps keys sorted, so equal records serialize identically
        serde_json::to_string(&self.fields).unwrap_or_default()
    }

    pub fn to_json_object(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl From<BTreeMap<String, Value>> for VehicleRecord {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        let mut record = Self::new();
        for (name, value) in fields {
            record.insert(name, value);
        }
        record
    }
}

impl From<VehicleRecord> for BTreeMap<String, Value> {
    fn from(record: VehicleRecord) -> Self {
        record.fields
    }
}

/// String form of a scalar value as written into a report cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
