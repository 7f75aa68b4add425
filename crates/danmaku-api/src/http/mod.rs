//! HTTP layer for the danmaku service.
//!
//! Axum-based endpoint at `/dplayer/v2` with bearer token verification,
//! the player envelope response format, and CORS support.

pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
