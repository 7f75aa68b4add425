//! Configuration loader for the danmaku service.
//!
//! Reads `danmaku.toml` from the data directory (`~/.danmaku` in
//! production) and deserializes it into [`ServiceConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use danmaku_types::config::ServiceConfig;

/// Resolve the service data directory.
///
/// Priority:
/// 1. `DANMAKU_DATA_DIR` environment variable
/// 2. `~/.danmaku`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DANMAKU_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".danmaku");
    }

    // Last resort: current directory
    PathBuf::from(".danmaku")
}

/// Load service configuration from `{data_dir}/danmaku.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("danmaku.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No danmaku.toml found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}
