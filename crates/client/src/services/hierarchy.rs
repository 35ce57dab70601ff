//! Per-view caches of the board hierarchy.
//!
//! Each view holds a transient cache that is authoritative only until the
//! next mutation or navigation. Consistency comes from one mechanism:
//! invalidate a [`RefreshScope`], then refetch it. No diffing, no optimistic
//! patching. Every view owns a cancellation token cancelled on teardown; a
//! response resolving after that never touches the cache.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use thiserror::Error;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use api::models::{AssignedUser, Board, Card, Comment, List};

use super::http::{ApiClient, ApiError};

/// Cache subset a mutation category must invalidate and refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
    /// Board- or list-level change: refetch the list collection only.
    Lists,
    /// Card change confined to one list: refetch that list's cards.
    Cards(i64),
    /// Card-detail change: refetch the card's detail, comments and assignees.
    CardDetail(i64),
    /// Cross-list move: refetch the whole visible subtree, because the moved
    /// card must vanish from the source list's independently cached
    /// collection and appear in the destination's.
    Subtree,
}

/// How a failed fetch is surfaced to the view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// Root fetch rejected with 401/403/404: leave the view, go up one level.
    #[error("{0}")]
    NavigateUp(ApiError),
    /// Everything else renders inline; the previous cache is retained.
    #[error("{0}")]
    Inline(ApiError),
}

impl ViewError {
    fn root(error: ApiError) -> Self {
        match &error {
            ApiError::Auth(_) | ApiError::Access { .. } => Self::NavigateUp(error),
            _ => Self::Inline(error),
        }
    }

    fn child(error: ApiError) -> Self {
        Self::Inline(error)
    }

    pub fn error(&self) -> &ApiError {
        match self {
            Self::NavigateUp(e) | Self::Inline(e) => e,
        }
    }
}

/// Run a fetch under a view's cancellation token. A response resolving after
/// teardown is reported as cancelled so it never reaches the cache.
async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        result = fut => {
            if cancel.is_cancelled() {
                Err(ApiError::Cancelled)
            } else {
                result
            }
        }
    }
}

/// The board-listing view.
pub struct BoardDirectory {
    client: ApiClient,
    boards: RwLock<Vec<Board>>,
    cancel: CancellationToken,
}

impl BoardDirectory {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            boards: RwLock::new(Vec::new()),
            cancel: CancellationToken::new(),
        }
    }

    /// Fetch the board collection. This is the root fetch of the view.
    pub async fn load(&self) -> Result<(), ViewError> {
        let boards: Vec<Board> = guarded(&self.cancel, self.client.get("/boards"))
            .await
            .map_err(ViewError::root)?;
        tracing::debug!(count = boards.len(), "loaded board collection");
        *self.boards.write().await = boards;
        Ok(())
    }

    pub async fn boards(&self) -> Vec<Board> {
        self.boards.read().await.clone()
    }

    /// Cancel in-flight fetches on navigation away.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

#[derive(Default)]
struct BoardViewState {
    board: Option<Board>,
    lists: Vec<List>,
    cards: HashMap<i64, Vec<Card>>,
}

/// A single board's view: metadata, the list collection, and a lazily filled
/// per-list card cache.
pub struct BoardView {
    client: ApiClient,
    board_id: i64,
    state: RwLock<BoardViewState>,
    cancel: CancellationToken,
}

impl BoardView {
    pub fn new(client: ApiClient, board_id: i64) -> Self {
        Self {
            client,
            board_id,
            state: RwLock::new(BoardViewState::default()),
            cancel: CancellationToken::new(),
        }
    }

    pub fn board_id(&self) -> i64 {
        self.board_id
    }

    /// Two-phase load: board metadata (the root fetch), then the list
    /// collection. Cards are not fetched here; each list pulls its own
    /// collection when it becomes visible via [`cards`](Self::cards).
    pub async fn load(&self) -> Result<(), ViewError> {
        let path = format!("/boards/{}", self.board_id);
        let board: Board = guarded(&self.cancel, self.client.get(&path))
            .await
            .map_err(ViewError::root)?;
        self.state.write().await.board = Some(board);

        self.refresh_lists().await
    }

    /// The list's card collection, fetched on first visibility and cached.
    pub async fn cards(&self, list_id: i64) -> Result<Vec<Card>, ViewError> {
        if let Some(cards) = self.state.read().await.cards.get(&list_id) {
            return Ok(cards.clone());
        }
        self.refresh_cards(list_id).await
    }

    /// Invalidate and refetch the given scope. This is the sole consistency
    /// mechanism after a mutation.
    pub async fn refresh(&self, scope: RefreshScope) -> Result<(), ViewError> {
        match scope {
            RefreshScope::Lists => self.refresh_lists().await,
            RefreshScope::Cards(list_id) => self.refresh_cards(list_id).await.map(|_| ()),
            RefreshScope::Subtree => self.refresh_subtree().await,
            // Detail scopes belong to a CardView; board caches are unaffected.
            RefreshScope::CardDetail(card_id) => {
                tracing::debug!(card_id, "card-detail refresh ignored at board level");
                Ok(())
            }
        }
    }

    async fn refresh_lists(&self) -> Result<(), ViewError> {
        let path = format!("/boards/{}/lists", self.board_id);
        let lists: Vec<List> = guarded(&self.cancel, self.client.get(&path))
            .await
            .map_err(ViewError::child)?;

        let mut state = self.state.write().await;
        state.lists = lists;
        // Card caches keyed by lists that no longer exist are dropped; the
        // survivors stay untouched and refetch on their own next mount.
        let live: HashSet<i64> = state.lists.iter().map(|list| list.id).collect();
        state.cards.retain(|list_id, _| live.contains(list_id));
        Ok(())
    }

    async fn refresh_cards(&self, list_id: i64) -> Result<Vec<Card>, ViewError> {
        let path = format!("/lists/{}/cards", list_id);
        let cards: Vec<Card> = guarded(&self.cancel, self.client.get(&path))
            .await
            .map_err(ViewError::child)?;
        self.state.write().await.cards.insert(list_id, cards.clone());
        Ok(cards)
    }

    async fn refresh_subtree(&self) -> Result<(), ViewError> {
        self.refresh_lists().await?;
        let list_ids: Vec<i64> = self
            .state
            .read()
            .await
            .lists
            .iter()
            .map(|list| list.id)
            .collect();
        for list_id in list_ids {
            self.refresh_cards(list_id).await?;
        }
        Ok(())
    }

    pub async fn board(&self) -> Option<Board> {
        self.state.read().await.board.clone()
    }

    pub async fn lists(&self) -> Vec<List> {
        self.state.read().await.lists.clone()
    }

    /// Cards currently cached for a list, if that list has been visible.
    pub async fn cached_cards(&self, list_id: i64) -> Option<Vec<Card>> {
        self.state.read().await.cards.get(&list_id).cloned()
    }

    /// Cancel in-flight fetches on navigation away.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

#[derive(Default)]
struct CardViewState {
    card: Option<Card>,
    comments: Vec<Comment>,
    assignees: Vec<AssignedUser>,
}

/// A card's detail view: the card itself plus its comments and assignees.
pub struct CardView {
    client: ApiClient,
    card_id: i64,
    state: RwLock<CardViewState>,
    cancel: CancellationToken,
}

impl CardView {
    pub fn new(client: ApiClient, card_id: i64) -> Self {
        Self {
            client,
            card_id,
            state: RwLock::new(CardViewState::default()),
            cancel: CancellationToken::new(),
        }
    }

    pub fn card_id(&self) -> i64 {
        self.card_id
    }

    /// Load the full detail. The card is the root fetch; comments and
    /// assignees are children whose failures surface inline without
    /// discarding the card.
    pub async fn load(&self) -> Result<(), ViewError> {
        let path = format!("/cards/{}", self.card_id);
        let card: Card = guarded(&self.cancel, self.client.get(&path))
            .await
            .map_err(ViewError::root)?;
        self.state.write().await.card = Some(card);

        let path = format!("/cards/{}/comments", self.card_id);
        let comments: Vec<Comment> = guarded(&self.cancel, self.client.get(&path))
            .await
            .map_err(ViewError::child)?;
        self.state.write().await.comments = comments;

        let path = format!("/cards/{}/assignments", self.card_id);
        let assignees: Vec<AssignedUser> = guarded(&self.cancel, self.client.get(&path))
            .await
            .map_err(ViewError::child)?;
        self.state.write().await.assignees = assignees;
        Ok(())
    }

    /// Refetch detail, comments and assignees after a card-detail mutation.
    pub async fn refresh(&self) -> Result<(), ViewError> {
        self.load().await
    }

    pub async fn card(&self) -> Option<Card> {
        self.state.read().await.card.clone()
    }

    pub async fn comments(&self) -> Vec<Comment> {
        self.state.read().await.comments.clone()
    }

    pub async fn assignees(&self) -> Vec<AssignedUser> {
        self.state.read().await.assignees.clone()
    }

    /// Cancel in-flight fetches on navigation away.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_auth_and_access_errors_navigate_up() {
        let auth = ViewError::root(ApiError::Auth("expired".to_string()));
        assert!(matches!(auth, ViewError::NavigateUp(_)));

        let missing = ViewError::root(ApiError::Access {
            status: 404,
            msg: "Board not found".to_string(),
        });
        assert!(matches!(missing, ViewError::NavigateUp(_)));
    }

    #[test]
    fn root_server_errors_stay_inline() {
        let error = ViewError::root(ApiError::Server {
            status: 500,
            msg: String::new(),
        });
        assert!(matches!(error, ViewError::Inline(_)));
        assert!(matches!(
            ViewError::root(ApiError::Timeout),
            ViewError::Inline(_)
        ));
    }

    #[test]
    fn child_errors_are_always_inline() {
        let error = ViewError::child(ApiError::Access {
            status: 404,
            msg: "List not found".to_string(),
        });
        assert!(matches!(error, ViewError::Inline(_)));
    }
}
