//! Destructive-action confirmation.
//!
//! Deletions ask an injected capability before issuing any network call, so
//! the guard is deterministic under test and never a blocking global prompt.

use async_trait::async_trait;

/// Interactive yes/no gate consulted before every destructive operation.
#[async_trait]
pub trait ConfirmDestructive: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Approves everything. Suits headless callers that put their own guard in
/// front of the dispatcher.
pub struct AlwaysConfirm;

#[async_trait]
impl ConfirmDestructive for AlwaysConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}
