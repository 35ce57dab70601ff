use serde::{Deserialize, Serialize};

/// Directory identity referenced by assignments and comment authorship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}
