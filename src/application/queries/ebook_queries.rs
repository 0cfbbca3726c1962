//! Ebook Queries

use crate::application::ports::EbookFilter;
use crate::domain::PageRequest;

/// 分页查询电子书
#[derive(Debug, Clone)]
pub struct ListEbooks {
    pub filter: EbookFilter,
    pub page: PageRequest,
}
