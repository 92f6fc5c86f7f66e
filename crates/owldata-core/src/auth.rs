//! Exchange of application credentials for a bearer token.

use std::fmt::{Debug, Formatter};

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{AppCredentials, ClientConfig};
use crate::http_client::{status_message, HttpAuth, HttpClient, HttpRequest};
use crate::AuthError;

/// Bearer token held for the lifetime of a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn bearer(&self) -> HttpAuth {
        HttpAuth::BearerToken(self.token.clone())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Posts the app id and secret to the token endpoint.
pub async fn authenticate(
    http: &dyn HttpClient,
    config: &ClientConfig,
    credentials: &AppCredentials,
) -> Result<Credential, AuthError> {
    let request = HttpRequest::post_form(config.token_url(), credentials.form_body())
        .with_timeout_ms(config.timeout_ms());

    let response = http
        .execute(request)
        .await
        .map_err(|e| AuthError::Transport(e.message().to_owned()))?;

    if !response.is_ok() {
        warn!(status = response.status, "authentication rejected");
        return Err(match status_message(response.status) {
            Some(message) => AuthError::Rejected {
                status: response.status,
                message,
            },
            None => AuthError::UnexpectedStatus {
                status: response.status,
            },
        });
    }

    let token = serde_json::from_str::<TokenResponse>(&response.body)
        .ok()
        .and_then(|payload| payload.token)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    info!(app_id = credentials.app_id(), "authenticated");
    Ok(Credential::new(token))
}
