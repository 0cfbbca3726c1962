//! Notifier Port - 消息通知
//!
//! 发送即返回，不等待投递确认

/// Notifier Port
pub trait NotifierPort: Send + Sync {
    /// 向指定主题发布一条消息
    fn publish(&self, topic: &str, message: String);
}
