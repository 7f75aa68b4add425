//! Token validation trait. The JWT implementation lives in danmaku-infra.

pub mod token;

pub use token::{TokenValidator, TOKEN_PREFIX};
