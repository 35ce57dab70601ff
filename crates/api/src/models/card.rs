use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

/// Unit of work belonging to exactly one list at any instant. A move
/// reassigns `list_id` and the server recomputes `order`; id, title,
/// description and due date survive unchanged.
///
/// `updated_at` is absent from the create envelope, hence optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub list_id: i64,
    pub creator_id: i64,
    pub due_date: Option<NaiveDateTime>,
    pub order: i64,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Request to create a card at the end of a list.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

/// Patch semantics for a card's due date. The wire contract takes the literal
/// string `"null"` to clear the stored value and a local ISO-8601 timestamp
/// to set it; an absent field keeps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueDatePatch {
    #[default]
    Keep,
    Clear,
    Set(NaiveDateTime),
}

impl DueDatePatch {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    fn wire_value(&self) -> Option<String> {
        match self {
            Self::Keep => None,
            Self::Clear => Some("null".to_string()),
            Self::Set(at) => Some(at.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

fn serialize_due_date_patch<S: Serializer>(
    patch: &DueDatePatch,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match patch.wire_value() {
        Some(value) => serializer.serialize_str(&value),
        None => serializer.serialize_none(),
    }
}

/// Request to update an existing card. Title stays required.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCard {
    pub title: String,
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "DueDatePatch::is_keep",
        serialize_with = "serialize_due_date_patch"
    )]
    pub due_date: DueDatePatch,
}

/// Request to reparent a card. The client supplies only the destination list;
/// the server appends the card at the end of it.
#[derive(Debug, Clone, Serialize)]
pub struct MoveCard {
    pub new_list_id: i64,
}

/// Slim card shape the move endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct MovedCard {
    pub id: i64,
    pub title: String,
    pub list_id: i64,
    pub order: i64,
}

/// Mutation response wrapper for card create/update operations.
#[derive(Debug, Clone, Deserialize)]
pub struct CardEnvelope {
    pub msg: String,
    pub card: Card,
}

/// Mutation response wrapper for the move operation.
#[derive(Debug, Clone, Deserialize)]
pub struct MovedCardEnvelope {
    pub msg: String,
    pub card: MovedCard,
}

/// Assignee entry embedded in filtered-search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardAssignee {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

/// Card shape returned by the cross-board filter endpoint: the card itself
/// plus its board and the users assigned to it.
#[derive(Debug, Clone, Deserialize)]
pub struct FilteredCard {
    #[serde(flatten)]
    pub card: Card,
    pub board_id: i64,
    pub assigned_users: Vec<CardAssignee>,
}
