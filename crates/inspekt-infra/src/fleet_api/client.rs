use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use inspekt_domain::instrument::instrumented;
use inspekt_domain::model::VehicleRecord;
use inspekt_domain::repository::{CredentialProvider, FleetSource, LabelColorSource};
use inspekt_types::{Error, Result};

use super::auth::TokenRefresh;
use super::error::CallError;
use super::retry::RetryPolicy;

/// Client for the vehicles and labels endpoints
pub struct FleetApiClient<C> {
    http: Client,
    base_url: String,
    credentials: C,
    policy: RetryPolicy,
}

impl<C: CredentialProvider> FleetApiClient<C> {
    pub fn new(http: Client, base_url: &str, credentials: C, policy: RetryPolicy) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            policy,
        }
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, CallError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CallError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| CallError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn vehicles_url(&self) -> std::result::Result<Url, CallError> {
        self.endpoint(&["dev", "index.php", "v1", "vehicles", "select", "active"])
    }

    fn label_url(&self, label_id: &str) -> std::result::Result<Url, CallError> {
        self.endpoint(&["dev", "index.php", "v1", "labels", label_id])
    }

    fn get_json(&self, url: &Url, token: &str) -> std::result::Result<Value, CallError> {
        let response = self.http.get(url.clone()).bearer_auth(token).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CallError::from_status(status));
        }
        response
            .json::<Value>()
            .map_err(|e| CallError::InvalidResponse(e.to_string()))
    }

    /// GET with token refresh inside bounded retry
    fn authorized_get(&self, operation: &str, url: &Url) -> std::result::Result<Value, CallError> {
        let mut refresh = TokenRefresh::new(&self.credentials);
        self.policy
            .run(operation, || refresh.call(|token| self.get_json(url, token)))
    }
}

impl<C: CredentialProvider> FleetSource for FleetApiClient<C> {
    fn active_vehicles(&self) -> Result<Vec<VehicleRecord>> {
        instrumented("download_active", &self.base_url, || {
            let vehicles = self
                .vehicles_url()
                .and_then(|url| self.authorized_get("download_active", &url))
                .and_then(vehicles_from)
                .map_err(|e| {
                    to_error(e, |message| Error::Fetch {
                        operation: "download_active".to_string(),
                        message,
                    })
                })?;
            debug!("fleet API returned {} active vehicles", vehicles.len());
            Ok(vehicles)
        })
    }
}

impl<C: CredentialProvider> LabelColorSource for FleetApiClient<C> {
    fn color_code(&self, label_id: &str) -> Result<String> {
        let body = self
            .label_url(label_id)
            .and_then(|url| self.authorized_get("query_color_code", &url))
            .map_err(|e| {
                to_error(e, |message| Error::Lookup {
                    label_id: label_id.to_string(),
                    message,
                })
            })?;
        debug!("color data returns: {}", body);
        Ok(color_code_from(&body))
    }
}

fn to_error(err: CallError, on_failure: impl FnOnce(String) -> Error) -> Error {
    if err.is_auth() {
        Error::Auth(err.to_string())
    } else {
        on_failure(err.to_string())
    }
}

/// Vehicle records from the active vehicles response (an array of objects)
pub(crate) fn vehicles_from(body: Value) -> std::result::Result<Vec<VehicleRecord>, CallError> {
    let Value::Array(items) = body else {
        return Err(CallError::InvalidResponse(
            "expected an array of vehicles".to_string(),
        ));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(object) => Ok(VehicleRecord::from_json_object(object)),
            other => Err(CallError::InvalidResponse(format!(
                "expected a vehicle object, got {}",
                other
            ))),
        })
        .collect()
}

/// `colorCode` of the first label in a label response, empty when absent
pub(crate) fn color_code_from(body: &Value) -> String {
    body.as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("colorCode"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
