//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod doc_commands;
mod ebook_commands;
mod user_commands;

pub mod handlers;

pub use doc_commands::*;
pub use ebook_commands::*;
pub use user_commands::*;
