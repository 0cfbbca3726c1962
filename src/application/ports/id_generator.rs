//! ID Generator Port - 全局唯一 ID

use thiserror::Error;

/// ID 生成错误
#[derive(Debug, Error)]
pub enum IdError {
    #[error("Clock moved backwards, refusing to generate id for {0}ms")]
    ClockMovedBackwards(i64),
}

/// ID Generator Port
///
/// 生成大致按时间递增的 64 位唯一 ID
pub trait IdGeneratorPort: Send + Sync {
    fn next_id(&self) -> Result<i64, IdError>;
}
