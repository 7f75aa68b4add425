use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single overlay comment tied to a video playback timestamp.
///
/// Comments are immutable after persistence; there is no update or delete
/// path. The five textual fields (`author`, `color`, `player`, `text`,
/// `position`) are HTML-encoded before a comment is stored, so everything
/// read back is safe to hand to the player UI verbatim. `time` is numeric
/// and `ip_address` is server-derived, neither is encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Declared display name of the submitter (not bound to the token identity).
    pub author: String,
    /// Render color, usually a hex code like `#ffffff`.
    pub color: String,
    /// Playback offset in seconds.
    pub time: f64,
    /// Player/video identifier. Doubles as the lookup id for the list operation.
    pub player: String,
    /// Free-form comment body.
    pub text: String,
    /// Render position: "right", "top" or "bottom". Anything else renders as scrolling.
    pub position: String,
    /// Submitter address derived from the request, never client-supplied.
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

/// The client-submitted subset of a comment, as it arrives on the wire.
///
/// Every field defaults when absent so that a structurally valid JSON body
/// with missing fields fails the emptiness validation rather than the parse.
/// The render position travels under the wire name `type`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub position: String,
    /// Fallback auth token for clients that cannot set an Authorization header.
    #[serde(default)]
    pub token: Option<String>,
}

/// The 5-tuple projection the player consumes:
/// `[time, type_code, color, author, text]`.
///
/// Serializes as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DanmakuFrame(pub f64, pub u8, pub String, pub String, pub String);

impl DanmakuFrame {
    pub fn from_comment(comment: &Comment) -> Self {
        Self(
            comment.time,
            position_code(&comment.position),
            comment.color.clone(),
            comment.author.clone(),
            comment.text.clone(),
        )
    }
}

/// Map a render position string to its integer code.
///
/// Unknown values fall back to 0 (scrolling) silently.
pub fn position_code(position: &str) -> u8 {
    match position {
        "right" => 0,
        "top" => 1,
        "bottom" => 2,
        _ => 0,
    }
}
