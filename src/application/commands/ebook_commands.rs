//! Ebook Commands

/// 保存电子书命令
///
/// `id` 为空时新增，否则按 ID 更新
#[derive(Debug, Clone)]
pub struct SaveEbook {
    pub id: Option<i64>,
    pub name: String,
    pub category1_id: Option<i64>,
    pub category2_id: Option<i64>,
    pub description: Option<String>,
    pub cover: Option<String>,
}

/// 删除电子书命令
#[derive(Debug, Clone)]
pub struct DeleteEbook {
    pub ebook_id: i64,
}
