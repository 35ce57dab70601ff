//! Wire types for the task-tracking REST contract.
//!
//! The server owns every entity described here; the client only consumes the
//! documented request and response shapes. Ids and positions are
//! server-assigned and never fabricated on this side of the wire.
//!
//! Timestamps arrive as ISO-8601 strings without an offset, so everything in
//! this crate carries [`chrono::NaiveDateTime`] rather than a zoned type.

pub mod models;
