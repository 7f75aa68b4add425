//! Expiring-key store trait backing the posting rate limit.

use std::time::Duration;

use danmaku_types::error::RepositoryError;

/// Key-value store with expiring keys, used to throttle submissions.
///
/// `acquire` must be a single atomic set-if-absent-with-TTL: two concurrent
/// calls on the same fresh key admit exactly one caller. A check-then-set
/// pair would let two rapid submissions from the same address through, so
/// the trait deliberately does not expose a separate setter.
///
/// Keys are opaque strings; the caller decides the key strategy. The
/// in-process implementation lives in danmaku-infra, and a distributed
/// store (e.g. Redis SET NX EX) can implement the same contract for
/// multi-instance deployments.
pub trait RateLimitStore: Send + Sync {
    /// Set `key` to `value` with the given TTL if the key is not live.
    ///
    /// Returns `true` when the key was acquired, `false` when it is still
    /// held from an earlier call.
    fn acquire(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Whether `key` is currently live.
    fn exists(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
