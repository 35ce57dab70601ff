//! Session lifecycle and the bearer credential behind every request.
//!
//! The [`Session`] object is injected into [`ApiClient`] instead of living in
//! a process-global request configuration. A stored token makes the next
//! start optimistically authenticated without a validation round trip; the
//! first 401 anywhere forces the session back to anonymous and drops the
//! durable token.

use std::{path::PathBuf, sync::Arc};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use tokio::sync::RwLock;

use api::models::{LoginRequest, LoginResponse, RegisterRequest, Registered};

use super::{
    http::{ApiClient, ApiError},
    notify::NoticeSender,
};

/// Authentication lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    token: Option<String>,
}

/// Shared credential state, one per running client instance.
#[derive(Debug)]
pub struct Session {
    inner: RwLock<SessionInner>,
    token_path: PathBuf,
}

impl Session {
    /// Load the session from the durable token file. A stored token yields an
    /// optimistically authenticated session; an expired one is discovered
    /// lazily when the first protected request comes back 401.
    pub fn load(token_path: impl Into<PathBuf>) -> Self {
        let token_path = token_path.into();
        let token = std::fs::read_to_string(&token_path)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|token| !token.is_empty());

        let state = if token.is_some() {
            tracing::info!("resuming stored session");
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };

        Self {
            inner: RwLock::new(SessionInner { state, token }),
            token_path,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state().await == SessionState::Authenticated
    }

    pub(crate) async fn bearer(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    /// User id from the stored token's claims. The token is the client's own,
    /// so the payload is read without signature verification.
    pub async fn user_id(&self) -> Option<i64> {
        self.inner
            .read()
            .await
            .token
            .as_deref()
            .and_then(token_user_id)
    }

    /// Store a fresh token in memory and in the durable file.
    async fn establish(&self, token: String) {
        if let Some(parent) = self.token_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&self.token_path, &token) {
            tracing::warn!(
                error = %e,
                path = %self.token_path.display(),
                "failed to persist session token"
            );
        }

        let mut inner = self.inner.write().await;
        inner.token = Some(token);
        inner.state = SessionState::Authenticated;
    }

    /// Drop the in-memory identity and the durable token, from any prior
    /// state. Triggered by logout and by any protected request rejected
    /// with 401.
    pub async fn invalidate(&self) {
        let mut inner = self.inner.write().await;
        if inner.token.take().is_some() {
            tracing::info!("session invalidated");
        }
        inner.state = SessionState::Anonymous;
        drop(inner);

        match std::fs::remove_file(&self.token_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, "failed to remove session token file"),
        }
    }

    async fn set_state(&self, state: SessionState) {
        self.inner.write().await.state = state;
    }
}

fn token_user_id(token: &str) -> Option<i64> {
    #[derive(Deserialize)]
    struct Claims {
        sub: String,
    }

    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    claims.sub.parse().ok()
}

/// Authentication lifecycle operations.
///
/// Outcomes surface as notices like every other operation; the boolean
/// return drives navigation at the caller.
pub struct AuthSession {
    client: ApiClient,
    notices: NoticeSender,
}

impl AuthSession {
    pub fn new(client: ApiClient, notices: NoticeSender) -> Self {
        Self { client, notices }
    }

    pub fn session(&self) -> &Arc<Session> {
        self.client.session()
    }

    /// Create an account. Success does not authenticate; the caller is
    /// expected to direct the user to the login boundary next.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> bool {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            self.notices
                .error("Username, email, and password are required");
            return false;
        }

        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self
            .client
            .post_public::<Registered, _>("/auth/register", &request)
            .await
        {
            Ok(registered) => {
                tracing::info!(user_id = registered.user_id, "registered new account");
                self.notices.success(registered.msg);
                true
            }
            Err(e) => {
                self.notices.error(e.notice_message("Registration failed"));
                false
            }
        }
    }

    /// Open a session and store the bearer token in memory and durably. A
    /// failed attempt leaves any previously stored token and the prior state
    /// untouched.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        if username.trim().is_empty() || password.is_empty() {
            self.notices.error("Username and password are required");
            return false;
        }

        let session = self.client.session();
        let prior = session.state().await;
        session.set_state(SessionState::Authenticating).await;

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        match self
            .client
            .post_public::<LoginResponse, _>("/auth/login", &request)
            .await
        {
            Ok(response) => {
                session.establish(response.access_token).await;
                tracing::info!("session established");
                self.notices.success("Logged in");
                true
            }
            Err(e) => {
                session.set_state(prior).await;
                self.notices.error(e.notice_message("Invalid credentials"));
                false
            }
        }
    }

    /// Clear the in-memory identity and the durable token, from any state.
    pub async fn logout(&self) {
        self.client.session().invalidate().await;
        self.notices.info("Logged out");
    }
}
