//! List and submit handlers for the `/dplayer/v2` endpoint.
//!
//! Both handlers always answer with the player envelope; store errors are
//! logged here and surfaced only as a generic message. The submit pipeline
//! short-circuits in order: parse, token, rate limit, field validation,
//! persistence.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use serde::Deserialize;

use danmaku_core::auth::{token::strip_prefix, TokenValidator};
use danmaku_types::comment::{CommentDraft, DanmakuFrame};
use danmaku_types::error::SubmitError;

use crate::http::extractors::client_ip::ClientIp;
use crate::http::response::{DanmakuResponse, ResponseCode};
use crate::state::AppState;

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Player/video id to fetch comments for.
    pub id: String,
    /// Maximum comments to return (default 1000).
    #[serde(default = "default_max")]
    pub max: u32,
}

fn default_max() -> u32 {
    1000
}

/// GET /dplayer/v2 - List comments for a video.
pub async fn list_danmaku(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> DanmakuResponse {
    match state.danmaku.list(&query.id, query.max).await {
        Ok(comments) => {
            let frames = comments.iter().map(DanmakuFrame::from_comment).collect();
            DanmakuResponse::success(frames)
        }
        Err(err) => {
            tracing::error!(error = %err, id = %query.id, "listing danmaku failed");
            DanmakuResponse::error(ResponseCode::DatabaseError, "database error")
        }
    }
}

/// POST /dplayer/v2 - Submit a comment.
pub async fn post_danmaku(
    State(state): State<AppState>,
    client_ip: ClientIp,
    headers: HeaderMap,
    body: Bytes,
) -> DanmakuResponse {
    let draft: CommentDraft = match serde_json::from_slice(&body) {
        Ok(draft) => draft,
        Err(err) => {
            tracing::debug!(error = %err, "rejecting malformed submission body");
            return DanmakuResponse::error(ResponseCode::IllegalData, "malformed danmaku payload");
        }
    };

    // Authorization header wins; the body token is a fallback for clients
    // that cannot set headers.
    let raw_token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| draft.token.clone());

    let Some(raw_token) = raw_token else {
        return DanmakuResponse::error(ResponseCode::PermissionDeny, "please log in before posting");
    };

    if !state.tokens.validate(strip_prefix(&raw_token)).await {
        return DanmakuResponse::error(
            ResponseCode::PermissionDeny,
            "invalid or expired credential, please log in again",
        );
    }

    let ip = client_ip.0;
    match state.danmaku.submit(draft, &ip).await {
        Ok(comment) => DanmakuResponse::success(vec![DanmakuFrame::from_comment(&comment)]),
        Err(SubmitError::RateLimited) => DanmakuResponse::error(
            ResponseCode::FrequentOperation,
            "posting too fast, try again shortly",
        ),
        Err(SubmitError::EmptyField(field)) => {
            tracing::debug!(field, ip = %ip, "rejecting submission with empty field");
            DanmakuResponse::error(ResponseCode::IllegalData, "incomplete danmaku data")
        }
        Err(SubmitError::Store(err)) => {
            tracing::error!(error = %err, ip = %ip, "saving danmaku failed");
            DanmakuResponse::error(ResponseCode::DatabaseError, "database error")
        }
    }
}
