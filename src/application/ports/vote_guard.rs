//! Vote Guard Port - 点赞去重
//!
//! 依赖外部缓存的原子 "不存在则写入并设置过期时间" 操作，
//! 多实例部署时由缓存本身保证同一 key 在窗口期内只能写入一次

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Vote Guard 错误
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache command failed: {0}")]
    CommandFailed(String),
}

/// Vote Guard Port
#[async_trait]
pub trait VoteGuardPort: Send + Sync {
    /// 尝试写入去重标记
    ///
    /// - `Ok(true)` - key 不存在，已写入并在 `ttl` 后过期
    /// - `Ok(false)` - key 已存在（窗口期内重复）
    async fn try_acquire(&self, key: &str, ttl: Duration) -> Result<bool, GuardError>;
}
