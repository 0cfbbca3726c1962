//! Domain Layer - 领域层
//!
//! - pagination: 分页值对象
//! - user: 登录名、密码规则
//! - vote: 点赞去重 key 与通知文案

pub mod pagination;
pub mod user;
pub mod vote;

pub use pagination::{Page, PageRequest, MAX_PAGE_SIZE};
pub use user::{LoginName, Password};
pub use vote::{vote_dedup_key, vote_message, VOTE_TOPIC};
