//! Infrastructure layer - local CSV input and the remote fleet API

pub mod fleet_api;
pub mod vehicle_csv;

pub use fleet_api::{FleetApiClient, LoginCredentialProvider, LoginCredentials, RetryPolicy};
pub use vehicle_csv::{load_vehicles, CsvLoaderError};
