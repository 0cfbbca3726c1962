//! Wiki - 电子书 / 文档知识库后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 分页值对象、用户凭证规则、点赞去重 key
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, VoteGuard, Notifier, IdGenerator）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Persistence: SQLite 存储
//! - Cache: Redis / 内存点赞去重
//! - Events: 主题消息推送
//! - Id: Snowflake ID 生成
//! - Worker: 电子书统计定时刷新

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
