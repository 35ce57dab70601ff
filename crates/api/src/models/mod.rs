//! Request and response shapes, one module per entity.
//!
//! Mutation responses arrive wrapped in an envelope carrying a human-readable
//! `msg` plus the affected entity under a per-type key; plain fetches return
//! bare entities or arrays. Error payloads are the bare [`ApiMessage`] shape.

use serde::{Deserialize, Serialize};

pub mod assignment;
pub mod auth;
pub mod board;
pub mod card;
pub mod comment;
pub mod list;
pub mod user;

pub use assignment::{AssignUser, AssignedUser, Assignment, AssignmentEnvelope, UnassignUser};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, Registered};
pub use board::{Board, BoardEnvelope, CreateBoard, UpdateBoard};
pub use card::{
    Card, CardAssignee, CardEnvelope, CreateCard, DueDatePatch, FilteredCard, MoveCard, MovedCard,
    MovedCardEnvelope, UpdateCard,
};
pub use comment::{Comment, CommentEnvelope, CreateComment, UpdateComment};
pub use list::{CreateList, List, ListEnvelope, UpdateList};
pub use user::User;

/// Bare `{"msg"}` acknowledgement; also the shape of every error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub msg: String,
}
