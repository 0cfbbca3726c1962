//! Doc Queries

use crate::domain::PageRequest;

/// 获取某本电子书下的全部文档（不分页）
#[derive(Debug, Clone)]
pub struct ListDocsByEbook {
    pub ebook_id: i64,
}

/// 分页查询文档
#[derive(Debug, Clone)]
pub struct ListDocs {
    pub ebook_id: Option<i64>,
    pub page: PageRequest,
}
