//! Fleet management API client
//!
//! Two layers wrap every request: [`RetryPolicy`] retries failed calls with
//! exponential backoff, and [`TokenRefresh`] renews the bearer token once
//! when the server rejects it.

mod auth;
mod client;
mod error;
mod retry;

#[cfg(test)]
mod test_server;

pub use auth::{LoginCredentialProvider, LoginCredentials, TokenRefresh};
pub use client::FleetApiClient;
pub use error::CallError;
pub use retry::RetryPolicy;

use std::time::Duration;

use inspekt_types::{Error, Result};

/// Blocking HTTP client with a per-request timeout
pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Fetch {
            operation: "build http client".to_string(),
            message: e.to_string(),
        })
}
