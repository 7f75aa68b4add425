//! Infrastructure implementations for the danmaku service.
//!
//! Concrete backends for the danmaku-core traits: SQLite comment storage,
//! an in-process expiring-key rate limiter, HS256 token validation, and the
//! TOML configuration loader.

pub mod auth;
pub mod config;
pub mod ratelimit;
pub mod sqlite;
