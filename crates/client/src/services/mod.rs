//! Service modules for the corkboard client.
//!
//! [`http`] is the shared transport; every other service issues its network
//! calls through it and reads the bearer credential from the injected
//! [`auth::Session`]. Consistency after a mutation comes from exactly one
//! mechanism: [`mutations`] triggers the matching refresh scope in
//! [`hierarchy`], which invalidates and refetches — no diffing, no
//! optimistic patching.

pub mod auth;
pub mod card_filter;
pub mod config;
pub mod confirm;
pub mod hierarchy;
pub mod http;
pub mod mutations;
pub mod notify;
pub mod user_lookup;
