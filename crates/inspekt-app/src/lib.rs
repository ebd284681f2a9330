//! Application service layer - config, report pipeline, export

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod repository;
