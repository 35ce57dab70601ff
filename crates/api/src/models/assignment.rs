use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The unique (card, user) association as the assign endpoint echoes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub card_id: i64,
    pub user_id: i64,
    pub assigned_at: NaiveDateTime,
}

/// Read shape of a card's assignee collection: the association joined with
/// the user's display identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedUser {
    pub assignment_id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub assigned_at: NaiveDateTime,
}

/// Request to assign a user to a card.
#[derive(Debug, Clone, Serialize)]
pub struct AssignUser {
    pub user_id: i64,
}

/// Request body for the unassign endpoint (a DELETE carrying JSON).
#[derive(Debug, Clone, Serialize)]
pub struct UnassignUser {
    pub user_id: i64,
}

/// Mutation response wrapper for the assign operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentEnvelope {
    pub msg: String,
    pub assignment: Assignment,
}
