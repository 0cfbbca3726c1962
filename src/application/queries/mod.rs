//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod doc_queries;
mod ebook_queries;
mod user_queries;

pub mod handlers;

pub use doc_queries::*;
pub use ebook_queries::*;
pub use user_queries::*;
