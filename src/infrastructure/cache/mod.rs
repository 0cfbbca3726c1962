//! Cache - 点赞去重标记存储
//!
//! 配置了 `cache.url` 时使用 Redis，否则退化为进程内存

mod memory_vote_guard;
mod redis_vote_guard;

pub use memory_vote_guard::InMemoryVoteGuard;
pub use redis_vote_guard::RedisVoteGuard;

use std::sync::Arc;

use crate::application::ports::{GuardError, VoteGuardPort};
use crate::config::CacheConfig;

/// 根据配置创建 Vote Guard
pub async fn build_vote_guard(config: &CacheConfig) -> Result<Arc<dyn VoteGuardPort>, GuardError> {
    match config.url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            let guard = RedisVoteGuard::connect(url).await?;
            Ok(Arc::new(guard))
        }
        _ => {
            tracing::warn!("cache.url not set, vote dedup markers are kept in process memory");
            Ok(Arc::new(InMemoryVoteGuard::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_falls_back_to_memory_without_url() {
        let guard = build_vote_guard(&CacheConfig { url: None }).await.unwrap();

        assert!(guard.try_acquire("k", Duration::from_secs(5)).await.unwrap());
        assert!(!guard.try_acquire("k", Duration::from_secs(5)).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_url_is_unavailable() {
        let result = build_vote_guard(&CacheConfig {
            url: Some("not a url".to_string()),
        })
        .await;

        assert!(matches!(result, Err(GuardError::Unavailable(_))));
    }
}
