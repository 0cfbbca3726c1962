//! Snowflake ID Generator
//!
//! 位布局（高位到低位）：
//! - 1 bit 符号位，恒为 0
//! - 41 bit 毫秒时间戳（相对 [`EPOCH_MS`]）
//! - 5 bit 数据中心 ID
//! - 5 bit 机器 ID
//! - 12 bit 毫秒内序列号

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::ports::{IdError, IdGeneratorPort};

/// 起始时间 2021-01-01T00:00:00Z
pub const EPOCH_MS: i64 = 1_609_459_200_000;

/// 数据中心 / 机器 ID 上限
pub const MAX_NODE_ID: u64 = 31;

const SEQUENCE_BITS: u64 = 12;
const WORKER_BITS: u64 = 5;
const DATACENTER_BITS: u64 = 5;

const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const WORKER_SHIFT: u64 = SEQUENCE_BITS;
const DATACENTER_SHIFT: u64 = SEQUENCE_BITS + WORKER_BITS;
const TIMESTAMP_SHIFT: u64 = SEQUENCE_BITS + WORKER_BITS + DATACENTER_BITS;

/// 无锁 Snowflake 生成器
///
/// `state` 打包保存上一次的 `(时间戳 << 12) | 序列号`，用 CAS 推进
pub struct SnowflakeIdGenerator {
    datacenter_id: u64,
    worker_id: u64,
    state: AtomicU64,
}

impl SnowflakeIdGenerator {
    /// 超出 0..=31 的部分被截断，配置加载时已校验范围
    pub fn new(datacenter_id: u64, worker_id: u64) -> Self {
        Self {
            datacenter_id: datacenter_id & MAX_NODE_ID,
            worker_id: worker_id & MAX_NODE_ID,
            state: AtomicU64::new(0),
        }
    }

    fn current_millis() -> i64 {
        Utc::now().timestamp_millis() - EPOCH_MS
    }

    fn compose(&self, timestamp: i64, sequence: u64) -> i64 {
        (((timestamp as u64) << TIMESTAMP_SHIFT)
            | (self.datacenter_id << DATACENTER_SHIFT)
            | (self.worker_id << WORKER_SHIFT)
            | sequence) as i64
    }
}

impl IdGeneratorPort for SnowflakeIdGenerator {
    fn next_id(&self) -> Result<i64, IdError> {
        loop {
            let last = self.state.load(Ordering::Acquire);
            let last_timestamp = (last >> SEQUENCE_BITS) as i64;
            let now = Self::current_millis();

            if now < last_timestamp {
                tracing::error!(
                    last_timestamp = last_timestamp,
                    now = now,
                    "Clock moved backwards"
                );
                return Err(IdError::ClockMovedBackwards(last_timestamp - now));
            }

            let sequence = if now == last_timestamp {
                let sequence = (last & SEQUENCE_MASK) + 1;
                if sequence > SEQUENCE_MASK {
                    // 本毫秒序列号用尽，等下一毫秒
                    std::hint::spin_loop();
                    continue;
                }
                sequence
            } else {
                0
            };

            let next = ((now as u64) << SEQUENCE_BITS) | sequence;
            if self
                .state
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Ok(self.compose(now, sequence));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_epoch_constant() {
        let epoch = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(epoch.timestamp_millis(), EPOCH_MS);
    }

    #[test]
    fn test_ids_strictly_increasing_and_unique() {
        let generator = SnowflakeIdGenerator::new(1, 1);
        let mut seen = HashSet::new();
        let mut last = 0;

        for _ in 0..10_000 {
            let id = generator.next_id().unwrap();
            assert!(id > last);
            assert!(seen.insert(id));
            last = id;
        }
    }

    #[test]
    fn test_node_bits_are_embedded() {
        let generator = SnowflakeIdGenerator::new(3, 7);
        let id = generator.next_id().unwrap() as u64;

        assert_eq!((id >> DATACENTER_SHIFT) & MAX_NODE_ID, 3);
        assert_eq!((id >> WORKER_SHIFT) & MAX_NODE_ID, 7);
        assert!(id >> 63 == 0);
    }

    #[test]
    fn test_timestamp_bits_are_close_to_now() {
        let generator = SnowflakeIdGenerator::new(0, 0);
        let id = generator.next_id().unwrap() as u64;

        let millis = (id >> TIMESTAMP_SHIFT) as i64 + EPOCH_MS;
        let drift = (Utc::now().timestamp_millis() - millis).abs();
        assert!(drift < 1_000);
    }

    #[test]
    fn test_unique_across_threads() {
        let generator = Arc::new(SnowflakeIdGenerator::new(1, 1));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = generator.clone();
                std::thread::spawn(move || {
                    (0..2_500)
                        .map(|_| generator.next_id().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 10_000);
    }
}
