//! HTTP transport shared by every service.
//!
//! One `reqwest::Client` wrapped with the bearer credential from the injected
//! [`Session`] and a uniform status mapping: 401 forces the session back to
//! anonymous before surfacing, 403/404 become an access error carrying the
//! server's `msg` payload, everything else non-success is a server error.
//! No retries anywhere.

use std::{sync::Arc, time::Duration};

use api::models::ApiMessage;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::auth::Session;

/// Errors surfaced by any client operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Local pre-dispatch validation failure; no request was issued.
    #[error("{0}")]
    Validation(String),
    /// 401 — the session has been forced back to anonymous.
    #[error("authentication required: {0}")]
    Auth(String),
    /// 403/404 — missing entity or missing permission.
    #[error("HTTP {status}: {msg}")]
    Access { status: u16, msg: String },
    /// Any other non-success status.
    #[error("server error: HTTP {status} - {msg}")]
    Server { status: u16, msg: String },
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to parse response: {0}")]
    Parse(String),
    /// The originating view was torn down before the response arrived.
    #[error("cancelled")]
    Cancelled,
}

impl ApiError {
    /// Message for a user-facing notice, preferring the server's error
    /// payload when one was present.
    pub fn notice_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(msg) | Self::Auth(msg) if !msg.is_empty() => msg.clone(),
            Self::Access { msg, .. } | Self::Server { msg, .. } if !msg.is_empty() => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// HTTP client for the task-tracking API.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: &str, session: Arc<Session>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("corkboard-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        self.dispatch(self.http.get(self.url(path))).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        self.dispatch(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "PUT");
        self.dispatch(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "DELETE");
        self.dispatch(self.http.delete(self.url(path))).await
    }

    /// DELETE carrying a JSON body (the unassign endpoint needs one).
    pub async fn delete_with_body<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "DELETE");
        self.dispatch(self.http.delete(self.url(path)).json(body)).await
    }

    /// POST on the unauthenticated boundary (register, login). No bearer is
    /// attached and a 401 here never resets the session.
    pub async fn post_public<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST (public)");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.handle_response(response, false).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let builder = match self.session.bearer().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await.map_err(map_reqwest_error)?;
        self.handle_response(response, true).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        reset_on_auth: bool,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let msg = serde_json::from_str::<ApiMessage>(&body)
            .map(|m| m.msg)
            .unwrap_or(body);
        tracing::warn!(status = status.as_u16(), msg = %msg, "request rejected");

        match status.as_u16() {
            401 => {
                if reset_on_auth {
                    self.session.invalidate().await;
                }
                Err(ApiError::Auth(msg))
            }
            status @ (403 | 404) => Err(ApiError::Access { status, msg }),
            status => Err(ApiError::Server { status, msg }),
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(e.to_string())
    }
}
