//! Doc Commands

/// 保存文档命令（文档 + 内容）
///
/// `id` 为空时新增，否则按 ID 更新
#[derive(Debug, Clone)]
pub struct SaveDoc {
    pub id: Option<i64>,
    pub ebook_id: i64,
    pub parent: i64,
    pub name: String,
    pub sort: i64,
    pub content: String,
}

/// 批量删除文档命令
#[derive(Debug, Clone)]
pub struct DeleteDocs {
    pub ids: Vec<i64>,
}

/// 读取文档内容命令（阅读数 + 1）
#[derive(Debug, Clone)]
pub struct ReadDocContent {
    pub doc_id: i64,
}

/// 点赞命令
#[derive(Debug, Clone)]
pub struct VoteDoc {
    pub doc_id: i64,
    /// 点赞来源地址
    pub voter_addr: String,
}

/// 刷新电子书统计命令
#[derive(Debug, Clone)]
pub struct RefreshEbookCounters;
