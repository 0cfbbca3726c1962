//! 分页值对象

use serde::Serialize;

/// 单页允许的最大记录数
pub const MAX_PAGE_SIZE: u32 = 1000;

/// 分页请求（页码从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_num: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page_num: u32, page_size: u32) -> Result<Self, &'static str> {
        if page_num == 0 {
            return Err("【页码】不能小于1");
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err("【每页条数】必须在1-1000之间");
        }
        Ok(Self {
            page_num,
            page_size,
        })
    }

    /// SQL OFFSET
    pub fn offset(&self) -> i64 {
        (self.page_num as i64 - 1) * self.page_size as i64
    }

    /// SQL LIMIT
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    /// 根据总数计算总页数
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size as u64)
    }
}

/// 一页查询结果
///
/// `total` 是满足过滤条件的全部记录数，与分页无关
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub total: u64,
    pub list: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: u64, list: Vec<T>) -> Self {
        Self { total, list }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            list: self.list.into_iter().map(f).collect(),
        }
    }
}
