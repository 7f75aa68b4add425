//! Shared domain types for the danmaku service.
//!
//! This crate contains the comment entity, its player-facing projection,
//! the service configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod comment;
pub mod config;
pub mod error;
