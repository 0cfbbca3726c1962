//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 点赞去重缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 点赞配置
    #[serde(default)]
    pub vote: VoteConfig,

    /// 电子书统计刷新配置
    #[serde(default)]
    pub footer: FooterConfig,

    /// ID 生成器配置
    #[serde(default)]
    pub id: IdConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 是否信任 `X-Forwarded-For` / `X-Real-IP`，仅在反向代理后部署时开启
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8880
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            trust_proxy_headers: false,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/wiki.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 缓存配置
///
/// 未设置 `url` 时使用进程内缓存（仅适用于单实例部署）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    /// Redis 地址，如 `redis://127.0.0.1:6379`
    #[serde(default)]
    pub url: Option<String>,
}

/// 点赞配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoteConfig {
    /// 同一 IP 对同一文档重复点赞的拦截窗口（秒）
    #[serde(default = "default_vote_window")]
    pub window_secs: u64,
}

fn default_vote_window() -> u64 {
    5000
}

impl Default for VoteConfig {
    fn default() -> Self {
        Self {
            window_secs: default_vote_window(),
        }
    }
}

/// 电子书阅读数/点赞数定时刷新配置
#[derive(Debug, Clone, Deserialize)]
pub struct FooterConfig {
    /// 是否启用定时刷新
    #[serde(default = "default_footer_enabled")]
    pub enabled: bool,

    /// 刷新间隔（秒）
    #[serde(default = "default_footer_interval")]
    pub interval_secs: u64,
}

fn default_footer_enabled() -> bool {
    true
}

fn default_footer_interval() -> u64 {
    5
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            enabled: default_footer_enabled(),
            interval_secs: default_footer_interval(),
        }
    }
}

/// Snowflake ID 生成器配置
#[derive(Debug, Clone, Deserialize)]
pub struct IdConfig {
    /// 数据中心 ID（0-31）
    #[serde(default = "default_datacenter_id")]
    pub datacenter_id: u64,

    /// 机器 ID（0-31）
    #[serde(default = "default_worker_id")]
    pub worker_id: u64,
}

fn default_datacenter_id() -> u64 {
    1
}

fn default_worker_id() -> u64 {
    1
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            datacenter_id: default_datacenter_id(),
            worker_id: default_worker_id(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
