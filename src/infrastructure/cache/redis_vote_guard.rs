//! Redis Vote Guard
//!
//! `SET key 1 NX PX ttl` 一条命令完成判断与写入，多实例共享同一个去重窗口

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::Client;
use std::time::Duration;

use crate::application::ports::{GuardError, VoteGuardPort};

/// Redis 去重标记
#[derive(Clone)]
pub struct RedisVoteGuard {
    conn: ConnectionManager,
}

impl RedisVoteGuard {
    /// 连接 Redis，断线后由 ConnectionManager 自动重连
    pub async fn connect(redis_url: &str) -> Result<Self, GuardError> {
        let config = ConnectionManagerConfig::new().set_number_of_retries(3);

        let client =
            Client::open(redis_url).map_err(|e| GuardError::Unavailable(e.to_string()))?;
        let conn = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(|e| GuardError::Unavailable(e.to_string()))?;

        tracing::info!("Redis vote guard connected");

        Ok(Self { conn })
    }
}

#[async_trait]
impl VoteGuardPort for RedisVoteGuard {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> Result<bool, GuardError> {
        let mut conn = self.conn.clone();
        let ttl_ms = ttl.as_millis().max(1) as u64;

        // 写入成功返回 OK，key 已存在返回 nil
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(1)
            .arg("NX")
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut conn)
            .await
            .map_err(|e| GuardError::CommandFailed(e.to_string()))?;

        let acquired = reply.is_some();
        tracing::debug!(key = %key, acquired = acquired, "Vote guard checked");

        Ok(acquired)
    }
}
