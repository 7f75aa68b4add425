//! Envelope response format consumed by the player widget.
//!
//! Every response is the same shape:
//! ```json
//! {
//!   "code": 0,
//!   "msg": "ok",
//!   "danmaku": [[12.5, 0, "#ffffff", "mika", "hello"], ...]
//! }
//! ```
//! `danmaku` is always present, possibly empty, never null. Callers must
//! inspect `code` rather than the HTTP status: everything returns 200
//! except permission failures, which return 403.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Serialize, Serializer};

use danmaku_types::comment::DanmakuFrame;

/// Outcome codes embedded in the envelope body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success = 0,
    DatabaseError = 1,
    PermissionDeny = 2,
    FrequentOperation = 3,
    IllegalData = 4,
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*self as i32)
    }
}

/// Envelope wrapping every endpoint response.
#[derive(Debug, Serialize)]
pub struct DanmakuResponse {
    pub code: ResponseCode,
    pub msg: String,
    pub danmaku: Vec<DanmakuFrame>,
}

impl DanmakuResponse {
    /// Success envelope carrying zero or more frames.
    pub fn success(danmaku: Vec<DanmakuFrame>) -> Self {
        Self {
            code: ResponseCode::Success,
            msg: "ok".to_string(),
            danmaku,
        }
    }

    /// Failure envelope. The message is the whole client-facing detail;
    /// internal error text never goes here.
    pub fn error(code: ResponseCode, msg: &str) -> Self {
        Self {
            code,
            msg: msg.to_string(),
            danmaku: Vec::new(),
        }
    }
}

impl IntoResponse for DanmakuResponse {
    fn into_response(self) -> Response {
        let status = match self.code {
            ResponseCode::PermissionDeny => StatusCode::FORBIDDEN,
            _ => StatusCode::OK,
        };

        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"code":1,"msg":"failed to serialize response","danmaku":[]}"#.to_string()
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serializes_as_integer() {
        let resp = DanmakuResponse::error(ResponseCode::FrequentOperation, "slow down");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 3);
        assert_eq!(json["msg"], "slow down");
        assert_eq!(json["danmaku"], serde_json::json!([]));
    }

    #[test]
    fn test_success_carries_frames() {
        let frame = DanmakuFrame(1.0, 2, "#fff".to_string(), "a".to_string(), "b".to_string());
        let resp = DanmakuResponse::success(vec![frame]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["danmaku"][0], serde_json::json!([1.0, 2, "#fff", "a", "b"]));
    }

    #[test]
    fn test_only_permission_deny_overrides_status() {
        let deny = DanmakuResponse::error(ResponseCode::PermissionDeny, "no").into_response();
        assert_eq!(deny.status(), StatusCode::FORBIDDEN);

        for code in [
            ResponseCode::Success,
            ResponseCode::DatabaseError,
            ResponseCode::FrequentOperation,
            ResponseCode::IllegalData,
        ] {
            let resp = DanmakuResponse::error(code, "x").into_response();
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }
}
