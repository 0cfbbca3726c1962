//! HTTP Handlers

mod doc;
mod ebook;
mod ping;
mod user;
mod websocket;

pub use doc::*;
pub use ebook::*;
pub use ping::*;
pub use user::*;
pub use websocket::*;
