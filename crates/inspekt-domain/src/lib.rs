//! Domain layer: vehicle records, merge and classification rules, label colors

pub mod instrument;
pub mod model;
pub mod repository;
pub mod service;
