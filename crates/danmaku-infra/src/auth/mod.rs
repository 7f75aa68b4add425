//! Token validation backends.

pub mod jwt;

pub use jwt::{issue_token, JwtTokenValidator};
