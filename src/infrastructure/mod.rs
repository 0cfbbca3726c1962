//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod cache;
pub mod events;
pub mod http;
pub mod id;
pub mod persistence;
pub mod worker;

pub use cache::{build_vote_guard, InMemoryVoteGuard, RedisVoteGuard};
pub use events::EventPublisher;
pub use id::SnowflakeIdGenerator;
pub use worker::{FooterWorker, FooterWorkerConfig};
