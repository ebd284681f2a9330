//! Remote source adapters

use inspekt_domain::repository::CredentialProvider;
use inspekt_infra::fleet_api::http_client;
use inspekt_infra::{FleetApiClient, LoginCredentialProvider};
use inspekt_types::Result;
use tracing::info;

use crate::config::Config;

/// Fleet API client with a freshly acquired access token
pub fn open_fleet_client(config: &Config) -> Result<FleetApiClient<LoginCredentialProvider>> {
    let http = http_client(config.request_timeout())?;
    let credentials =
        LoginCredentialProvider::new(http.clone(), &config.api_base_url, config.login_credentials()?);
    credentials.token()?;
    info!("access token acquired for {}", config.api_base_url);

    Ok(FleetApiClient::new(
        http,
        &config.api_base_url,
        credentials,
        config.retry_policy(),
    ))
}
