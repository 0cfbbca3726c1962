//! Events - 主题消息推送

mod publisher;

pub use publisher::{EventPublisher, TopicMessage};
