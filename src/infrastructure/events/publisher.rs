//! Event Publisher Implementation
//!
//! 进程内的主题消息广播，WebSocket 订阅者从这里取消息

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::application::ports::NotifierPort;

/// 每个广播通道缓存的消息数，慢订阅者超出后丢弃旧消息
const CHANNEL_CAPACITY: usize = 100;

/// 主题消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessage {
    pub topic: String,
    pub message: String,
}

/// 事件发布器
pub struct EventPublisher {
    /// topic -> broadcast sender（订阅单个主题）
    topic_channels: DashMap<String, broadcast::Sender<TopicMessage>>,
    /// 全部主题的消息
    global_channel: broadcast::Sender<TopicMessage>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (global_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            topic_channels: DashMap::new(),
            global_channel: global_tx,
        }
    }

    /// 订阅所有主题
    pub fn subscribe_global(&self) -> broadcast::Receiver<TopicMessage> {
        self.global_channel.subscribe()
    }

    /// 订阅单个主题，通道不存在时创建
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<TopicMessage> {
        self.topic_channels
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// 移除没有订阅者的主题通道
    pub fn prune_topics(&self) {
        self.topic_channels
            .retain(|_, sender| sender.receiver_count() > 0);
    }

    #[cfg(test)]
    pub(crate) fn topic_count(&self) -> usize {
        self.topic_channels.len()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifierPort for EventPublisher {
    fn publish(&self, topic: &str, message: String) {
        let event = TopicMessage {
            topic: topic.to_string(),
            message,
        };

        if let Some(sender) = self.topic_channels.get(topic) {
            if let Err(e) = sender.send(event.clone()) {
                tracing::debug!(topic = %topic, error = %e, "Failed to publish topic event (no receivers)");
            }
        }

        if let Err(e) = self.global_channel.send(event) {
            tracing::debug!(topic = %topic, error = %e, "Failed to publish global event (no receivers)");
        }
    }
}
