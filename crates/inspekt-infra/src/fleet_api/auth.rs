use std::sync::{Mutex, PoisonError};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use inspekt_domain::repository::CredentialProvider;
use inspekt_types::{Error, Result};

use super::error::CallError;

/// Account used for the login call
#[derive(Debug, Clone, Default)]
pub struct LoginCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Acquires bearer tokens from the login endpoint and keeps the current one
pub struct LoginCredentialProvider {
    http: Client,
    login_url: String,
    credentials: LoginCredentials,
    token: Mutex<Option<String>>,
}

impl LoginCredentialProvider {
    pub fn new(http: Client, base_url: &str, credentials: LoginCredentials) -> Self {
        Self {
            http,
            login_url: format!("{}/index.php/login", base_url.trim_end_matches('/')),
            credentials,
            token: Mutex::new(None),
        }
    }

    fn login(&self) -> Result<String> {
        info!("requesting access token from {}", self.login_url);
        let basic = STANDARD.encode(format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        ));

        let response = self
            .http
            .post(&self.login_url)
            .header(AUTHORIZATION, format!("Basic {}", basic))
            .json(&LoginRequest {
                username: &self.credentials.username,
                password: &self.credentials.password,
            })
            .send()
            .map_err(|e| Error::Auth(format!("login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Auth(format!("login returned HTTP {}", status.as_u16())));
        }

        let body: Value = response
            .json()
            .map_err(|e| Error::Auth(format!("login response is not JSON: {}", e)))?;
        access_token_from(&body)
    }

    fn store(&self, token: &str) {
        let mut slot = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.to_string());
    }
}

impl CredentialProvider for LoginCredentialProvider {
    fn token(&self) -> Result<String> {
        let cached = self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(token) = cached {
            return Ok(token);
        }
        let token = self.login()?;
        self.store(&token);
        Ok(token)
    }

    fn refresh(&self) -> Result<String> {
        debug!("refreshing access token");
        let token = self.login()?;
        self.store(&token);
        Ok(token)
    }
}

/// Token at `oauth.access_token` of a login response
pub(crate) fn access_token_from(body: &Value) -> Result<String> {
    body.pointer("/oauth/access_token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Auth("login response has no oauth.access_token".to_string()))
}

/// Renews the bearer token once per logical call when a request is rejected.
///
/// After a successful refresh the rejected request is sent again right away
/// with the new token, so the repeat does not depend on retry budget left in
/// the surrounding [`RetryPolicy`](super::RetryPolicy). Any later rejection
/// is terminal.
pub struct TokenRefresh<'a, C: ?Sized> {
    credentials: &'a C,
    refreshed: bool,
}

impl<'a, C: CredentialProvider + ?Sized> TokenRefresh<'a, C> {
    pub fn new(credentials: &'a C) -> Self {
        Self {
            credentials,
            refreshed: false,
        }
    }

    pub fn call<T, F>(&mut self, mut request: F) -> std::result::Result<T, CallError>
    where
        F: FnMut(&str) -> std::result::Result<T, CallError>,
    {
        let token = self
            .credentials
            .token()
            .map_err(|e| CallError::Credential(e.to_string()))?;

        match request(&token) {
            Err(CallError::Unauthorized(status)) if !self.refreshed => {
                warn!("token rejected with HTTP {}, refreshing", status);
                self.refreshed = true;
                let token = self
                    .credentials
                    .refresh()
                    .map_err(|e| CallError::Credential(e.to_string()))?;
                request(&token).map_err(rejected)
            }
            other => other.map_err(rejected),
        }
    }
}

fn rejected(err: CallError) -> CallError {
    match err {
        CallError::Unauthorized(status) => CallError::Rejected(status),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet_api::test_server::{client, serve};
    use crate::fleet_api::RetryPolicy;
    use serde_json::json;
    use std::cell::RefCell;
    use std::time::Duration;

    /// Hands out "token-N", N increasing with each refresh
    struct CountingCredentials {
        generation: RefCell<u32>,
        fail_refresh: bool,
    }

    impl CountingCredentials {
        fn new() -> Self {
            Self {
                generation: RefCell::new(1),
                fail_refresh: false,
            }
        }
    }

    impl CredentialProvider for CountingCredentials {
        fn token(&self) -> Result<String> {
            Ok(format!("token-{}", self.generation.borrow()))
        }

        fn refresh(&self) -> Result<String> {
            if self.fail_refresh {
                return Err(Error::Auth("login returned HTTP 500".to_string()));
            }
            *self.generation.borrow_mut() += 1;
            self.token()
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_tries: 3,
            max_elapsed: Duration::from_secs(5),
            initial_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_login_over_http() {
        let (base_url, server) = serve(vec![(
            "200 OK",
            r#"{"oauth": {"access_token": "abc", "expires_in": 1200}}"#,
        )]);
        let provider = LoginCredentialProvider::new(
            client(),
            &format!("{}/", base_url),
            LoginCredentials {
                client_id: "API_Explorer".to_string(),
                client_secret: "s3cret".to_string(),
                username: "fleet".to_string(),
                password: "pw".to_string(),
            },
        );

        assert_eq!(provider.token().unwrap(), "abc");
        // cached, no second request
        assert_eq!(provider.token().unwrap(), "abc");

        let received = server.join().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].line, "POST /index.php/login HTTP/1.1");
        let expected = format!("Basic {}", STANDARD.encode("API_Explorer:s3cret"));
        assert_eq!(received[0].header("authorization"), Some(expected.as_str()));
        let body: Value = serde_json::from_str(&received[0].body).unwrap();
        assert_eq!(body, json!({"username": "fleet", "password": "pw"}));
    }

    #[test]
    fn test_login_rejected() {
        let (base_url, server) = serve(vec![("401 Unauthorized", "{}")]);
        let provider =
            LoginCredentialProvider::new(client(), &base_url, LoginCredentials::default());
        assert!(matches!(provider.token(), Err(Error::Auth(_))));
        server.join().unwrap();
    }

    #[test]
    fn test_access_token_from_response() {
        let body = json!({"oauth": {"access_token": "abc", "expires_in": 1200}});
        assert_eq!(access_token_from(&body).unwrap(), "abc");
        assert!(matches!(access_token_from(&json!({})), Err(Error::Auth(_))));
    }

    #[test]
    fn test_refresh_then_retry_with_new_token() {
        let credentials = CountingCredentials::new();
        let mut refresh = TokenRefresh::new(&credentials);
        let mut seen = Vec::new();

        let result = policy().run("op", || {
            refresh.call(|token| {
                seen.push(token.to_string());
                if token == "token-1" {
                    Err(CallError::Unauthorized(401))
                } else {
                    Ok("body")
                }
            })
        });

        assert_eq!(result.unwrap(), "body");
        assert_eq!(seen, vec!["token-1", "token-2"]);
    }

    #[test]
    fn test_refreshes_only_once() {
        let credentials = CountingCredentials::new();
        let mut refresh = TokenRefresh::new(&credentials);
        let mut calls = 0;

        let result: std::result::Result<(), CallError> = policy().run("op", || {
            refresh.call(|_| {
                calls += 1;
                Err(CallError::Unauthorized(403))
            })
        });

        let err = result.unwrap_err();
        assert!(matches!(err, CallError::Rejected(403)));
        assert!(err.is_auth());
        assert_eq!(calls, 2);
        assert_eq!(*credentials.generation.borrow(), 2);
    }

    #[test]
    fn test_rejection_on_last_attempt_still_uses_new_token() {
        let credentials = CountingCredentials::new();
        let mut refresh = TokenRefresh::new(&credentials);
        let mut seen = Vec::new();

        let result = policy().run("op", || {
            refresh.call(|token| {
                seen.push(token.to_string());
                match seen.len() {
                    1 | 2 => Err(CallError::Status(500)),
                    3 => Err(CallError::Unauthorized(401)),
                    _ => Ok("body"),
                }
            })
        });

        assert_eq!(result.unwrap(), "body");
        assert_eq!(seen, vec!["token-1", "token-1", "token-1", "token-2"]);
    }

    #[test]
    fn test_rejection_after_spent_budget_is_auth_failure() {
        let credentials = CountingCredentials::new();
        let mut refresh = TokenRefresh::new(&credentials);
        let mut calls = 0;

        let result: std::result::Result<(), CallError> = policy().run("op", || {
            refresh.call(|_| {
                calls += 1;
                if calls < 3 {
                    Err(CallError::Status(500))
                } else {
                    Err(CallError::Unauthorized(401))
                }
            })
        });

        let err = result.unwrap_err();
        assert!(matches!(err, CallError::Rejected(401)));
        assert!(err.is_auth());
        assert_eq!(calls, 4);
        assert_eq!(*credentials.generation.borrow(), 2);
    }

    #[test]
    fn test_failed_refresh_is_terminal() {
        let credentials = CountingCredentials {
            generation: RefCell::new(1),
            fail_refresh: true,
        };
        let mut refresh = TokenRefresh::new(&credentials);
        let mut calls = 0;

        let result: std::result::Result<(), CallError> = policy().run("op", || {
            refresh.call(|_| {
                calls += 1;
                Err(CallError::Unauthorized(401))
            })
        });

        let err = result.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_other_errors_pass_through() {
        let credentials = CountingCredentials::new();
        let mut refresh = TokenRefresh::new(&credentials);
        let result: std::result::Result<(), CallError> =
            refresh.call(|_| Err(CallError::Status(500)));
        assert!(matches!(result, Err(CallError::Status(500))));
        assert_eq!(*credentials.generation.borrow(), 1);
    }
}
