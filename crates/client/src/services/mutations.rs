//! Mutation dispatch.
//!
//! Every mutation follows one contract: validate required fields locally,
//! issue exactly one network call, and on success trigger the refresh scope
//! for its category and emit a success notice. On failure the cached state is
//! left untouched and the server's error payload, when present, becomes the
//! notice. Destructive operations consult the injected confirmation guard
//! first; a declined confirmation is a quiet no-op.

use std::sync::Arc;

use api::models::{
    ApiMessage, AssignUser, AssignmentEnvelope, BoardEnvelope, CardEnvelope, CommentEnvelope,
    CreateBoard, CreateCard, CreateComment, CreateList, DueDatePatch, ListEnvelope, MoveCard,
    MovedCardEnvelope, UnassignUser, UpdateBoard, UpdateCard, UpdateComment, UpdateList,
};

use super::{
    confirm::ConfirmDestructive,
    hierarchy::{BoardDirectory, BoardView, CardView, RefreshScope},
    http::{ApiClient, ApiError},
    notify::NoticeSender,
};

pub struct MutationDispatcher {
    client: ApiClient,
    confirm: Arc<dyn ConfirmDestructive>,
    notices: NoticeSender,
}

impl MutationDispatcher {
    pub fn new(
        client: ApiClient,
        confirm: Arc<dyn ConfirmDestructive>,
        notices: NoticeSender,
    ) -> Self {
        Self {
            client,
            confirm,
            notices,
        }
    }

    // --- boards ---

    /// Create a board and reload the directory. Returns whether the mutation
    /// was applied.
    pub async fn create_board(
        &self,
        directory: &BoardDirectory,
        title: &str,
        description: &str,
    ) -> bool {
        let Some(title) = self.require(title, "Board title cannot be empty") else {
            return false;
        };
        let request = CreateBoard {
            title,
            description: description.to_string(),
        };
        match self.client.post::<BoardEnvelope, _>("/boards", &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.reload_directory(directory).await;
                true
            }
            Err(e) => self.fail(e, "Failed to create board"),
        }
    }

    pub async fn update_board(&self, view: &BoardView, title: &str, description: &str) -> bool {
        let Some(title) = self.require(title, "Board title cannot be empty") else {
            return false;
        };
        let request = UpdateBoard {
            title,
            description: description.to_string(),
        };
        let path = format!("/boards/{}", view.board_id());
        match self.client.put::<BoardEnvelope, _>(&path, &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_board(view, RefreshScope::Lists).await;
                true
            }
            Err(e) => self.fail(e, "Failed to update board"),
        }
    }

    pub async fn delete_board(&self, directory: &BoardDirectory, board_id: i64) -> bool {
        if !self
            .confirmed("Delete this board? All of its lists and cards will be deleted as well.")
            .await
        {
            return false;
        }
        let path = format!("/boards/{board_id}");
        match self.client.delete::<ApiMessage>(&path).await {
            Ok(ack) => {
                self.notices.success(ack.msg);
                self.reload_directory(directory).await;
                true
            }
            Err(e) => self.fail(e, "Failed to delete board"),
        }
    }

    // --- lists ---

    pub async fn create_list(&self, view: &BoardView, title: &str) -> bool {
        let Some(title) = self.require(title, "List title cannot be empty") else {
            return false;
        };
        let path = format!("/boards/{}/lists", view.board_id());
        let request = CreateList { title };
        match self.client.post::<ListEnvelope, _>(&path, &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_board(view, RefreshScope::Lists).await;
                true
            }
            Err(e) => self.fail(e, "Failed to create list"),
        }
    }

    pub async fn update_list(&self, view: &BoardView, list_id: i64, title: &str) -> bool {
        let Some(title) = self.require(title, "List title cannot be empty") else {
            return false;
        };
        let path = format!("/lists/{list_id}");
        let request = UpdateList { title };
        match self.client.put::<ListEnvelope, _>(&path, &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_board(view, RefreshScope::Lists).await;
                true
            }
            Err(e) => self.fail(e, "Failed to update list"),
        }
    }

    pub async fn delete_list(&self, view: &BoardView, list_id: i64) -> bool {
        if !self
            .confirmed("Delete this list? Its cards will be deleted as well.")
            .await
        {
            return false;
        }
        let path = format!("/lists/{list_id}");
        match self.client.delete::<ApiMessage>(&path).await {
            Ok(ack) => {
                self.notices.success(ack.msg);
                self.refresh_board(view, RefreshScope::Lists).await;
                true
            }
            Err(e) => self.fail(e, "Failed to delete list"),
        }
    }

    // --- cards ---

    pub async fn create_card(&self, view: &BoardView, list_id: i64, title: &str) -> bool {
        let Some(title) = self.require(title, "Card title cannot be empty") else {
            return false;
        };
        let path = format!("/lists/{list_id}/cards");
        let request = CreateCard {
            title,
            description: None,
            due_date: None,
        };
        match self.client.post::<CardEnvelope, _>(&path, &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_board(view, RefreshScope::Cards(list_id)).await;
                true
            }
            Err(e) => self.fail(e, "Failed to create card"),
        }
    }

    pub async fn update_card(
        &self,
        view: &CardView,
        title: &str,
        description: Option<&str>,
        due_date: DueDatePatch,
    ) -> bool {
        let Some(title) = self.require(title, "Card title cannot be empty") else {
            return false;
        };
        let path = format!("/cards/{}", view.card_id());
        let request = UpdateCard {
            title,
            description: description.map(str::to_string),
            due_date,
        };
        match self.client.put::<CardEnvelope, _>(&path, &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_card(view).await;
                true
            }
            Err(e) => self.fail(e, "Failed to update card"),
        }
    }

    pub async fn delete_card(&self, view: &BoardView, list_id: i64, card_id: i64) -> bool {
        if !self.confirmed("Delete this card?").await {
            return false;
        }
        let path = format!("/cards/{card_id}");
        match self.client.delete::<ApiMessage>(&path).await {
            Ok(ack) => {
                self.notices.success(ack.msg);
                self.refresh_board(view, RefreshScope::Cards(list_id)).await;
                true
            }
            Err(e) => self.fail(e, "Failed to delete card"),
        }
    }

    /// Reparent a card to another list. Only the destination id goes over the
    /// wire; the server owns position assignment (append to end). The refresh
    /// covers the whole subtree so the card vanishes from the source list's
    /// cache and appears in the destination's.
    pub async fn move_card(&self, view: &BoardView, card_id: i64, new_list_id: i64) -> bool {
        let path = format!("/cards/{card_id}/move");
        let request = MoveCard { new_list_id };
        match self
            .client
            .put::<MovedCardEnvelope, _>(&path, &request)
            .await
        {
            Ok(envelope) => {
                tracing::debug!(
                    card_id = envelope.card.id,
                    list_id = envelope.card.list_id,
                    "card moved"
                );
                self.notices.success(envelope.msg);
                self.refresh_board(view, RefreshScope::Subtree).await;
                true
            }
            Err(e) => self.fail(e, "Failed to move card"),
        }
    }

    // --- comments ---

    pub async fn add_comment(&self, view: &CardView, content: &str) -> bool {
        let Some(content) = self.require(content, "Comment cannot be empty") else {
            return false;
        };
        let path = format!("/cards/{}/comments", view.card_id());
        let request = CreateComment { content };
        match self.client.post::<CommentEnvelope, _>(&path, &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_card(view).await;
                true
            }
            Err(e) => self.fail(e, "Failed to add comment"),
        }
    }

    pub async fn update_comment(&self, view: &CardView, comment_id: i64, content: &str) -> bool {
        let Some(content) = self.require(content, "Comment cannot be empty") else {
            return false;
        };
        let path = format!("/comments/{comment_id}");
        let request = UpdateComment { content };
        match self.client.put::<CommentEnvelope, _>(&path, &request).await {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_card(view).await;
                true
            }
            Err(e) => self.fail(e, "Failed to update comment"),
        }
    }

    pub async fn delete_comment(&self, view: &CardView, comment_id: i64) -> bool {
        if !self.confirmed("Delete this comment?").await {
            return false;
        }
        let path = format!("/comments/{comment_id}");
        match self.client.delete::<ApiMessage>(&path).await {
            Ok(ack) => {
                self.notices.success(ack.msg);
                self.refresh_card(view).await;
                true
            }
            Err(e) => self.fail(e, "Failed to delete comment"),
        }
    }

    // --- assignments ---

    pub async fn assign_user(&self, view: &CardView, user_id: i64) -> bool {
        let path = format!("/cards/{}/assign", view.card_id());
        let request = AssignUser { user_id };
        match self
            .client
            .post::<AssignmentEnvelope, _>(&path, &request)
            .await
        {
            Ok(envelope) => {
                self.notices.success(envelope.msg);
                self.refresh_card(view).await;
                true
            }
            Err(e) => self.fail(e, "Failed to assign user"),
        }
    }

    pub async fn unassign_user(&self, view: &CardView, user_id: i64) -> bool {
        if !self
            .confirmed("Unassign this user from the card?")
            .await
        {
            return false;
        }
        let path = format!("/cards/{}/unassign", view.card_id());
        let request = UnassignUser { user_id };
        match self
            .client
            .delete_with_body::<ApiMessage, _>(&path, &request)
            .await
        {
            Ok(ack) => {
                self.notices.success(ack.msg);
                self.refresh_card(view).await;
                true
            }
            Err(e) => self.fail(e, "Failed to unassign user"),
        }
    }

    // --- shared plumbing ---

    fn require(&self, value: &str, message: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.notices.error(message);
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    async fn confirmed(&self, message: &str) -> bool {
        if self.confirm.confirm(message).await {
            true
        } else {
            tracing::debug!("destructive action declined");
            false
        }
    }

    fn fail(&self, error: ApiError, fallback: &str) -> bool {
        self.notices.error(error.notice_message(fallback));
        false
    }

    async fn reload_directory(&self, directory: &BoardDirectory) {
        if let Err(e) = directory.load().await {
            tracing::warn!(error = %e, "refresh after mutation failed");
            self.notices
                .error(e.error().notice_message("Failed to refresh boards"));
        }
    }

    async fn refresh_board(&self, view: &BoardView, scope: RefreshScope) {
        if let Err(e) = view.refresh(scope).await {
            tracing::warn!(error = %e, "refresh after mutation failed");
            self.notices
                .error(e.error().notice_message("Failed to refresh board"));
        }
    }

    async fn refresh_card(&self, view: &CardView) {
        if let Err(e) = view.refresh().await {
            tracing::warn!(error = %e, "refresh after mutation failed");
            self.notices
                .error(e.error().notice_message("Failed to refresh card"));
        }
    }
}
