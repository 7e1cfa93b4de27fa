//! HTTP client for the Passport authentication service

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Path of the reset-request endpoint under the configured base URL
const RESET_PATH: &str = "/auth/request-password-reset";

/// Hard cap on a single reset request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-error taxonomy for the auth client.
///
/// The dialog collapses all of these into one generic message; the
/// distinction exists for the logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Status class and loosely-typed body fields of a reset-request reply.
///
/// The service does not guarantee a body shape: either field may be absent,
/// and the body may be missing or not JSON at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    pub accepted: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    email: &'a str,
}

/// Client for the Passport authentication service
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client against the given base URL
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        // Cookie store on: the service expects session-bearing requests
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Ask the service to send a password-reset email.
    ///
    /// Issues exactly one POST; there are no retries. A body that is absent
    /// or not JSON counts as having no fields, not as a failure. Transport
    /// failures are logged here before being returned.
    pub async fn request_password_reset(&self, email: &str) -> Result<ServerReply, AuthError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), RESET_PATH);

        let response = match self
            .http
            .post(&url)
            .json(&ResetRequest { email })
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err = AuthError::from(err);
                tracing::warn!(error = %err, "password reset request failed");
                return Err(err);
            }
        };

        let accepted = response.status().is_success();
        let body: Option<Value> = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).ok(),
            Err(_) => None,
        };

        Ok(ServerReply {
            accepted,
            message: body_field(body.as_ref(), "message"),
            error: body_field(body.as_ref(), "error"),
        })
    }
}

/// Read a string field out of the optional reply body
fn body_field(body: Option<&Value>, key: &str) -> Option<String> {
    body?.get(key)?.as_str().map(str::to_string)
}
