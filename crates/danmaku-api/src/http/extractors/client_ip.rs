//! Submitter address extractor.
//!
//! Resolves the client address from, in order: `X-Real-IP`, the first entry
//! of `X-Forwarded-For`, the socket peer address. The result feeds the
//! rate-limit key and the stored `ip_address` field; it is never taken from
//! the request body.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// Resolved submitter address.
pub struct ClientIp(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp(resolve(parts)))
    }
}

fn resolve(parts: &Parts) -> String {
    if let Some(real_ip) = parts.headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    if let Some(forwarded) = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/dplayer/v2");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_real_ip_takes_priority() {
        let parts = parts_with_headers(&[
            ("x-real-ip", "203.0.113.9"),
            ("x-forwarded-for", "198.51.100.1, 10.0.0.1"),
        ]);
        assert_eq!(resolve(&parts), "203.0.113.9");
    }

    #[test]
    fn test_forwarded_for_uses_first_entry() {
        let parts = parts_with_headers(&[("x-forwarded-for", "198.51.100.1, 10.0.0.1")]);
        assert_eq!(resolve(&parts), "198.51.100.1");
    }

    #[test]
    fn test_peer_address_fallback() {
        let mut parts = parts_with_headers(&[]);
        parts
            .extensions
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4321))));
        assert_eq!(resolve(&parts), "127.0.0.1");
    }

    #[test]
    fn test_no_source_yields_unknown() {
        let parts = parts_with_headers(&[]);
        assert_eq!(resolve(&parts), "unknown");
    }
}
