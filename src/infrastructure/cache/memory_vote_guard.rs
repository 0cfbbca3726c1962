//! In-Memory Vote Guard
//!
//! 单进程内的去重标记，适用于开发环境和测试

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::application::ports::{GuardError, VoteGuardPort};

/// 两次清理过期标记的最小间隔
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// 内存去重标记表，value 为过期时刻
pub struct InMemoryVoteGuard {
    markers: DashMap<String, Instant>,
    started_at: Instant,
    purge_interval: Duration,
    /// 上次清理时刻，相对 `started_at` 的毫秒数
    last_purge_ms: AtomicU64,
}

impl InMemoryVoteGuard {
    pub fn new() -> Self {
        Self::with_purge_interval(PURGE_INTERVAL)
    }

    fn with_purge_interval(purge_interval: Duration) -> Self {
        Self {
            markers: DashMap::new(),
            started_at: Instant::now(),
            purge_interval,
            last_purge_ms: AtomicU64::new(0),
        }
    }

    /// 清理已过期的标记
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.markers.retain(|_, expires_at| *expires_at > now);
    }

    /// 距上次清理超过间隔时清理一次，并发调用只有一个会执行
    fn purge_if_due(&self) {
        let now_ms = self.started_at.elapsed().as_millis() as u64;
        let last_ms = self.last_purge_ms.load(Ordering::Acquire);
        if now_ms.saturating_sub(last_ms) < self.purge_interval.as_millis() as u64 {
            return;
        }

        if self
            .last_purge_ms
            .compare_exchange(last_ms, now_ms, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.purge_expired();
            tracing::debug!(remaining = self.markers.len(), "Expired vote markers purged");
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for InMemoryVoteGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoteGuardPort for InMemoryVoteGuard {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> Result<bool, GuardError> {
        self.purge_if_due();

        let now = Instant::now();
        // entry 持有分片写锁，判断与写入是原子的
        let acquired = match self.markers.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() > now {
                    false
                } else {
                    entry.insert(now + ttl);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now + ttl);
                true
            }
        };

        tracing::debug!(key = %key, acquired = acquired, "Vote guard checked");

        Ok(acquired)
    }
}
