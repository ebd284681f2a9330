//! Domain model types

pub mod dataset;
pub mod urgency;
pub mod vehicle_record;

pub use dataset::{AnnotatedDataset, AnnotatedRecord, ColorCodeAnnotation, MergedDataset};
pub use urgency::UrgencyTier;
pub use vehicle_record::{
    cell_text, VehicleRecord, DATE_FIELD, DATE_FORMAT, GROUP_FIELD, ID_FIELD, LABEL_FIELD,
};
