//! Submit/list pipeline for overlay comments.
//!
//! `DanmakuService` owns the storage-facing half of a submission: rate
//! limiting, field validation, sanitization, persistence. Token handling is
//! HTTP-shaped (header vs body fallback) and stays in the API layer.

use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use danmaku_types::comment::{Comment, CommentDraft};
use danmaku_types::config::RateLimitConfig;
use danmaku_types::error::{RepositoryError, SubmitError};

use crate::ratelimit::RateLimitStore;
use crate::repository::comment::CommentRepository;
use crate::sanitize;

/// Comment submission and retrieval, generic over the storage collaborators.
pub struct DanmakuService<R, L> {
    comments: R,
    limiter: L,
    rate_limit: RateLimitConfig,
}

impl<R: CommentRepository, L: RateLimitStore> DanmakuService<R, L> {
    pub fn new(comments: R, limiter: L, rate_limit: RateLimitConfig) -> Self {
        Self {
            comments,
            limiter,
            rate_limit,
        }
    }

    /// Run a submission through the pipeline: rate limit, validate,
    /// sanitize, persist. Returns the stored comment for the echo response.
    ///
    /// The limiter key is consumed as soon as the submitter is admitted, so
    /// a submission that later fails validation still counts against the
    /// posting window.
    pub async fn submit(&self, draft: CommentDraft, ip: &str) -> Result<Comment, SubmitError> {
        let key = format!("{}{}", self.rate_limit.key_prefix, ip);
        let window = Duration::from_secs(self.rate_limit.window_secs);

        let admitted = self.limiter.acquire(&key, ip, window).await?;
        if !admitted {
            tracing::info!(ip, "submission throttled");
            return Err(SubmitError::RateLimited);
        }

        require_non_empty(&draft.author, "author")?;
        require_non_empty(&draft.color, "color")?;
        require_non_empty(&draft.player, "player")?;
        require_non_empty(&draft.text, "text")?;
        require_non_empty(&draft.position, "type")?;

        let comment = Comment {
            id: Uuid::now_v7(),
            author: sanitize::encode(&draft.author).into_owned(),
            color: sanitize::encode(&draft.color).into_owned(),
            time: draft.time,
            player: sanitize::encode(&draft.player).into_owned(),
            text: sanitize::encode(&draft.text).into_owned(),
            position: sanitize::encode(&draft.position).into_owned(),
            ip_address: ip.to_string(),
            created_at: Utc::now(),
        };

        Ok(self.comments.save(&comment).await?)
    }

    /// Get up to `max` comments for a player/video id.
    pub async fn list(&self, player: &str, max: u32) -> Result<Vec<Comment>, RepositoryError> {
        self.comments.list_by_player(player, max).await
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), SubmitError> {
    if value.trim().is_empty() {
        Err(SubmitError::EmptyField(field))
    } else {
        Ok(())
    }
}
