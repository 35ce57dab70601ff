use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Ordered container of cards within exactly one board. The `order` value is
/// server-assigned; the client never computes or reorders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: i64,
    pub title: String,
    pub board_id: i64,
    pub order: i64,
    pub created_at: NaiveDateTime,
}

/// Request to create a list at the end of a board.
#[derive(Debug, Clone, Serialize)]
pub struct CreateList {
    pub title: String,
}

/// Request to rename a list.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateList {
    pub title: String,
}

/// Mutation response wrapper for list operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope {
    pub msg: String,
    pub list: List,
}
