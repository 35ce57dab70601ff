//! Incremental user-directory lookup feeding assignment candidates.
//!
//! Selection is two-step: picking a suggestion only stages it; a separate
//! confirm hands the id to the caller. Closing the dropdown waits out a short
//! grace period so a click that lands on a suggestion still registers, and a
//! staged candidate survives the close.

use std::collections::HashSet;
use std::time::Duration;

use api::models::User;

use super::http::{ApiClient, ApiError};

/// Queries shorter than this (trimmed) never reach the network.
const MIN_QUERY_LEN: usize = 2;

/// Delay before an outside click closes the dropdown.
const DISMISS_GRACE: Duration = Duration::from_millis(100);

pub struct UserLookupAssistant {
    client: ApiClient,
    input: String,
    suggestions: Vec<User>,
    dropdown_open: bool,
    candidate: Option<User>,
    last_query: Option<String>,
}

impl UserLookupAssistant {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            input: String::new(),
            suggestions: Vec::new(),
            dropdown_open: false,
            candidate: None,
            last_query: None,
        }
    }

    /// Handle an input change. Below the minimum length the suggestion list
    /// is forced empty and hidden without a network call; a repeat of the
    /// previous trimmed query is deduplicated. Results matching an id in
    /// `already_assigned` never surface.
    pub async fn input(
        &mut self,
        text: &str,
        already_assigned: &HashSet<i64>,
    ) -> Result<(), ApiError> {
        self.input = text.to_string();
        self.candidate = None;

        let query = text.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            self.suggestions.clear();
            self.dropdown_open = false;
            self.last_query = None;
            return Ok(());
        }

        if self.last_query.as_deref() == Some(query) {
            self.dropdown_open = true;
            return Ok(());
        }

        let path = format!("/users/search?q={}", urlencoding::encode(query));
        match self.client.get::<Vec<User>>(&path).await {
            Ok(users) => {
                self.last_query = Some(query.to_string());
                self.suggestions = users
                    .into_iter()
                    .filter(|user| !already_assigned.contains(&user.id))
                    .collect();
                self.dropdown_open = true;
                tracing::debug!(count = self.suggestions.len(), "lookup suggestions updated");
                Ok(())
            }
            Err(e) => {
                self.suggestions.clear();
                self.dropdown_open = false;
                Err(e)
            }
        }
    }

    /// Stage a suggestion as the pending candidate and mirror its username
    /// into the input. The caller is not notified yet.
    pub fn pick(&mut self, user_id: i64) -> bool {
        let Some(user) = self
            .suggestions
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
        else {
            return false;
        };
        self.input = user.username.clone();
        self.candidate = Some(user);
        self.suggestions.clear();
        self.dropdown_open = false;
        true
    }

    /// Hand the staged candidate's id to the caller and reset the widget.
    /// Returns `None` when nothing was staged.
    pub fn confirm(&mut self) -> Option<i64> {
        let user = self.candidate.take()?;
        self.input.clear();
        self.suggestions.clear();
        self.dropdown_open = false;
        self.last_query = None;
        Some(user.id)
    }

    /// A click outside the widget's surface: close the dropdown after the
    /// grace delay. A staged candidate is never discarded by this.
    pub async fn click_outside(&mut self) {
        tokio::time::sleep(DISMISS_GRACE).await;
        self.dropdown_open = false;
    }

    pub fn input_value(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[User] {
        &self.suggestions
    }

    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn candidate(&self) -> Option<&User> {
        self.candidate.as_ref()
    }
}
