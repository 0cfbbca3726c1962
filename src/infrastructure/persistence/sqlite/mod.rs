//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod doc_repo;
mod ebook_repo;
mod user_repo;

pub use database::*;
pub use doc_repo::*;
pub use ebook_repo::*;
pub use user_repo::*;
