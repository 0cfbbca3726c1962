//! ID - 分布式 ID 生成

mod snowflake;

pub use snowflake::{SnowflakeIdGenerator, EPOCH_MS, MAX_NODE_ID};
