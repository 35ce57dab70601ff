//! Client-side synchronization and mutation layer for the task-tracking API.
//!
//! The rendering surface is deliberately out of scope: these services hold
//! the cached hierarchy, gate every call behind the session, and hand
//! outcomes back as notices for whatever layer draws them.

pub mod services;
