use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Root container of the hierarchy; owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: NaiveDateTime,
}

/// Request to create a new board.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBoard {
    pub title: String,
    pub description: String,
}

/// Request to update a board's metadata. Title stays required.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBoard {
    pub title: String,
    pub description: String,
}

/// Mutation response wrapper for board operations.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardEnvelope {
    pub msg: String,
    pub board: Board,
}
