//! Application state wiring the service to its concrete collaborators.
//!
//! `DanmakuService` is generic over the repository and limiter traits;
//! AppState pins it to the SQLite and in-memory implementations.

use std::sync::Arc;

use danmaku_core::service::danmaku::DanmakuService;
use danmaku_infra::auth::JwtTokenValidator;
use danmaku_infra::config::{load_config, resolve_data_dir};
use danmaku_infra::ratelimit::MemoryRateLimitStore;
use danmaku_infra::sqlite::comment::SqliteCommentRepository;
use danmaku_infra::sqlite::pool::DatabasePool;
use danmaku_types::config::ServiceConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteDanmakuService = DanmakuService<SqliteCommentRepository, MemoryRateLimitStore>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub danmaku: Arc<ConcreteDanmakuService>,
    pub tokens: Arc<JwtTokenValidator>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Initialize from the data directory: load config, open the database,
    /// wire the service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("danmaku.db").display()
        );

        Self::build(config, &db_url).await
    }

    /// Wire the state against an explicit database URL.
    pub async fn build(config: ServiceConfig, database_url: &str) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(database_url).await?;

        let comments = SqliteCommentRepository::new(db_pool);
        let limiter = MemoryRateLimitStore::new();
        let danmaku = DanmakuService::new(comments, limiter, config.rate_limit.clone());
        let tokens = JwtTokenValidator::new(&config.jwt_secret);

        Ok(Self {
            danmaku: Arc::new(danmaku),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        })
    }
}
