//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::infrastructure::id::MAX_NODE_ID;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `WIKI_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `WIKI_SERVER__PORT=8080`
/// - `WIKI_DATABASE__PATH=/data/wiki.db`
/// - `WIKI_CACHE__URL=redis://127.0.0.1:6379`
/// - `WIKI_VOTE__WINDOW_SECS=86400`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8880)?
        .set_default("server.trust_proxy_headers", false)?
        .set_default("database.path", "data/wiki.db")?
        .set_default("database.max_connections", 5)?
        .set_default("vote.window_secs", 5000)?
        .set_default("footer.enabled", true)?
        .set_default("footer.interval_secs", 5)?
        .set_default("id.datacenter_id", 1)?
        .set_default("id.worker_id", 1)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: WIKI_CACHE__URL=redis://cache:6379
    builder = builder.add_source(
        Environment::with_prefix("WIKI")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.vote.window_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Vote window cannot be 0".to_string(),
        ));
    }

    if config.footer.enabled && config.footer.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Footer refresh interval cannot be 0 when refresh is enabled".to_string(),
        ));
    }

    if config.id.datacenter_id > MAX_NODE_ID || config.id.worker_id > MAX_NODE_ID {
        return Err(ConfigError::ValidationError(format!(
            "Snowflake datacenter_id and worker_id must be within 0..={}",
            MAX_NODE_ID
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Trust Proxy Headers: {}", config.server.trust_proxy_headers);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    match &config.cache.url {
        Some(_) => tracing::info!("Vote Cache: redis"),
        None => tracing::info!("Vote Cache: in-memory"),
    }
    tracing::info!("Vote Window: {}s", config.vote.window_secs);
    tracing::info!("Footer Refresh Enabled: {}", config.footer.enabled);
    if config.footer.enabled {
        tracing::info!("Footer Refresh Interval: {}s", config.footer.interval_secs);
    }
    tracing::info!(
        "Snowflake Node: datacenter={} worker={}",
        config.id.datacenter_id,
        config.id.worker_id
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_footer_interval() {
        let mut config = AppConfig::default();
        config.footer.interval_secs = 0;
        assert!(validate_config(&config).is_err());

        config.footer.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_node_id_overflow() {
        let mut config = AppConfig::default();
        config.id.worker_id = 32;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[cache]\nurl = \"redis://localhost:6379\"\n\n[vote]\nwindow_secs = 60"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.cache.url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.vote.window_secs, 60);
        assert_eq!(config.database.path, "data/wiki.db");
        assert!(!config.server.trust_proxy_headers);
    }
}
