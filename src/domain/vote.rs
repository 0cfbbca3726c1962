//! Vote Context - 点赞去重 key 与通知文案

/// 点赞通知的消息主题
pub const VOTE_TOPIC: &str = "VOTE_TOPIC";

/// 构造去重 key：同一文档 + 同一来源地址在窗口期内只能点赞一次
pub fn vote_dedup_key(doc_id: i64, voter_addr: &str) -> String {
    format!("DOC_VOTE_{}_{}", doc_id, voter_addr)
}

/// 点赞成功后推送的消息
pub fn vote_message(doc_name: &str) -> String {
    format!("【{}】被点赞！", doc_name)
}
