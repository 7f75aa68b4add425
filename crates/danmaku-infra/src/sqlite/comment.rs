//! SQLite comment repository implementation.
//!
//! Implements `CommentRepository` from `danmaku-core` using sqlx with split
//! read/write pools. Rows are write-once; there are no update paths.

use chrono::{DateTime, Utc};
use danmaku_core::repository::comment::CommentRepository;
use danmaku_types::comment::Comment;
use danmaku_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CommentRepository`.
pub struct SqliteCommentRepository {
    pool: DatabasePool,
}

impl SqliteCommentRepository {
    /// Create a new comment repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct CommentRow {
    id: String,
    author: String,
    color: String,
    time: f64,
    player: String,
    text: String,
    position: String,
    ip_address: String,
    created_at: String,
}

impl CommentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            author: row.try_get("author")?,
            color: row.try_get("color")?,
            time: row.try_get("time")?,
            player: row.try_get("player")?,
            text: row.try_get("text")?,
            position: row.try_get("position")?,
            ip_address: row.try_get("ip_address")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_comment(self) -> Result<Comment, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid comment id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Comment {
            id,
            author: self.author,
            color: self.color,
            time: self.time,
            player: self.player,
            text: self.text,
            position: self.position,
            ip_address: self.ip_address,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

// ---------------------------------------------------------------------------
// CommentRepository implementation
// ---------------------------------------------------------------------------

impl CommentRepository for SqliteCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<Comment, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO comments (id, author, color, time, player, text, position, ip_address, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(comment.id.to_string())
        .bind(&comment.author)
        .bind(&comment.color)
        .bind(comment.time)
        .bind(&comment.player)
        .bind(&comment.text)
        .bind(&comment.position)
        .bind(&comment.ip_address)
        .bind(comment.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(comment.clone())
    }

    async fn list_by_player(&self, player: &str, max: u32) -> Result<Vec<Comment>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM comments WHERE player = ? ORDER BY time ASC LIMIT ?",
        )
        .bind(player)
        .bind(max as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in &rows {
            let comment_row =
                CommentRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            comments.push(comment_row.into_comment()?);
        }

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn comment(player: &str, time: f64, text: &str) -> Comment {
        Comment {
            id: Uuid::now_v7(),
            author: "mika".to_string(),
            color: "#ffffff".to_string(),
            time,
            player: player.to_string(),
            text: text.to_string(),
            position: "right".to_string(),
            ip_address: "10.0.0.1".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_list_roundtrip() {
        let repo = SqliteCommentRepository::new(test_pool().await);

        let saved = repo.save(&comment("v-001", 3.5, "hello")).await.unwrap();
        let listed = repo.list_by_player("v-001", 1000).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);
        assert_eq!(listed[0].text, "hello");
        assert_eq!(listed[0].time, 3.5);
        assert_eq!(listed[0].ip_address, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_list_unknown_player_is_empty() {
        let repo = SqliteCommentRepository::new(test_pool().await);

        let listed = repo.list_by_player("v-404", 1000).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_playback_time() {
        let repo = SqliteCommentRepository::new(test_pool().await);

        repo.save(&comment("v-001", 9.0, "late")).await.unwrap();
        repo.save(&comment("v-001", 1.0, "early")).await.unwrap();
        repo.save(&comment("v-001", 5.0, "middle")).await.unwrap();

        let listed = repo.list_by_player("v-001", 1000).await.unwrap();
        let texts: Vec<&str> = listed.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["early", "middle", "late"]);
    }

    #[tokio::test]
    async fn test_list_respects_max() {
        let repo = SqliteCommentRepository::new(test_pool().await);

        for i in 0..5 {
            repo.save(&comment("v-001", i as f64, "x")).await.unwrap();
        }

        let listed = repo.list_by_player("v-001", 3).await.unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn test_players_are_isolated() {
        let repo = SqliteCommentRepository::new(test_pool().await);

        repo.save(&comment("v-001", 1.0, "a")).await.unwrap();
        repo.save(&comment("v-002", 1.0, "b")).await.unwrap();

        let listed = repo.list_by_player("v-002", 1000).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "b");
    }

    #[tokio::test]
    async fn test_encoded_text_survives_storage() {
        let repo = SqliteCommentRepository::new(test_pool().await);

        repo.save(&comment("v-001", 1.0, "&lt;script&gt;")).await.unwrap();

        let listed = repo.list_by_player("v-001", 1000).await.unwrap();
        assert_eq!(listed[0].text, "&lt;script&gt;");
    }
}
