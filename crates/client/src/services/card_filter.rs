//! Cross-board card search composed from independent predicates.
//!
//! Every predicate is optional; the server combines those present with AND
//! semantics. Submitting with nothing set is valid and requests the full
//! unconstrained result set — zero query parameters go over the wire.

use chrono::NaiveDate;

use api::models::FilteredCard;

use super::http::{ApiClient, ApiError};

/// Independent, optional predicates over cards across all of a user's boards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFilter {
    /// Title substring match.
    pub title_contains: Option<String>,
    /// Restrict to a single board.
    pub board_id: Option<i64>,
    /// Restrict to a single list.
    pub list_id: Option<i64>,
    /// Cards created by the current user.
    pub created_by_me: bool,
    /// Cards assigned to the current user.
    pub assigned_to_me: bool,
    /// Due-date window start day; sent as that day's 00:00:00, inclusive.
    pub due_from: Option<NaiveDate>,
    /// Due-date window end day; sent as that day's 23:59:59, inclusive.
    pub due_until: Option<NaiveDate>,
}

impl CardFilter {
    /// Query pairs in wire form. The two identity toggles stay two distinct
    /// parameters even when both are active; they are never merged.
    pub fn query_params(&self, current_user_id: Option<i64>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(title) = self
            .title_contains
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
        {
            params.push(("title_contains", title.to_string()));
        }
        if let Some(board_id) = self.board_id {
            params.push(("board_id", board_id.to_string()));
        }
        if let Some(list_id) = self.list_id {
            params.push(("list_id", list_id.to_string()));
        }
        if let Some(user_id) = current_user_id {
            if self.created_by_me {
                params.push(("creator_id", user_id.to_string()));
            }
            if self.assigned_to_me {
                params.push(("user_id", user_id.to_string()));
            }
        }
        if let Some(day) = self.due_from {
            params.push(("due_date_start", day_bound(day, 0, 0, 0)));
        }
        if let Some(day) = self.due_until {
            params.push(("due_date_end", day_bound(day, 23, 59, 59)));
        }

        params
    }

    /// Full request path; an empty filter yields no query string at all.
    pub fn to_path(&self, current_user_id: Option<i64>) -> String {
        let params = self.query_params(current_user_id);
        if params.is_empty() {
            return "/cards/filter".to_string();
        }
        let query: Vec<String> = params
            .into_iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(&value)))
            .collect();
        format!("/cards/filter?{}", query.join("&"))
    }
}

fn day_bound(day: NaiveDate, hour: u32, min: u32, sec: u32) -> String {
    day.and_hms_opt(hour, min, sec)
        .expect("in-range clock time")
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Executes composed card queries. Identity-scope toggles resolve against the
/// session's own user id.
pub struct CardSearch {
    client: ApiClient,
}

impl CardSearch {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn run(&self, filter: &CardFilter) -> Result<Vec<FilteredCard>, ApiError> {
        let user_id = self.client.session().user_id().await;
        if user_id.is_none() && (filter.created_by_me || filter.assigned_to_me) {
            tracing::warn!("identity-scoped filter without a session user id");
        }
        let path = filter.to_path(user_id);
        tracing::debug!(%path, "running card filter");
        self.client.get(&path).await
    }
}
