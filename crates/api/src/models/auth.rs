use serde::{Deserialize, Serialize};

/// Request to create an account.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful registration acknowledgement. Registration never returns a
/// token; the caller goes through the login boundary next.
#[derive(Debug, Clone, Deserialize)]
pub struct Registered {
    pub msg: String,
    pub user_id: i64,
}

/// Request to open a session.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login: the bearer token attached to every protected request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}
