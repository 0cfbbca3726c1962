//! Query Handlers 实现

mod doc_handlers;
mod ebook_handlers;
mod user_handlers;

pub use doc_handlers::*;
pub use ebook_handlers::*;
pub use user_handlers::*;
