use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A comment on a card. Immutable once created except through an explicit
/// edit or deletion by its author (server-enforced).
///
/// `username` is denormalized for display; the create envelope omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub card_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Request to add a comment to a card.
#[derive(Debug, Clone, Serialize)]
pub struct CreateComment {
    pub content: String,
}

/// Request to edit an existing comment.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateComment {
    pub content: String,
}

/// Mutation response wrapper for comment operations.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentEnvelope {
    pub msg: String,
    pub comment: Comment,
}
