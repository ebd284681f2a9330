//! Domain services

pub mod color_cache;
pub mod label_annotation;
pub mod record_merger;
pub mod urgency_classifier;

pub use color_cache::{ColorCache, LabelStore};
pub use label_annotation::{annotate, label_ids, ProgressCallback};
pub use record_merger::{merge_for_columns, merge_records};
pub use urgency_classifier::{classify, months_diff, parse_due_date};
