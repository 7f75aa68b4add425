//! Comment repository trait definition.
//!
//! Defines the persistence interface for overlay comments. The
//! infrastructure layer (danmaku-infra) implements this trait with SQLite.

use danmaku_types::comment::Comment;
use danmaku_types::error::RepositoryError;

/// Repository trait for comment persistence.
///
/// Comments are write-once: there are no update or delete operations.
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CommentRepository: Send + Sync {
    /// Persist a comment and return the stored row.
    fn save(
        &self,
        comment: &Comment,
    ) -> impl std::future::Future<Output = Result<Comment, RepositoryError>> + Send;

    /// Get up to `max` comments for a player/video id, ordered by playback time.
    fn list_by_player(
        &self,
        player: &str,
        max: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Comment>, RepositoryError>> + Send;
}
