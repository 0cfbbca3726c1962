//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Page, PageRequest};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ============================================================================
// Ebook Repository
// ============================================================================

/// 电子书实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbookRecord {
    pub id: i64,
    pub name: String,
    pub category1_id: Option<i64>,
    pub category2_id: Option<i64>,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub doc_count: i64,
    pub view_count: i64,
    pub vote_count: i64,
}

/// 电子书查询条件
#[derive(Debug, Clone, Default)]
pub struct EbookFilter {
    /// 名称模糊匹配
    pub name: Option<String>,
    /// 二级分类精确匹配
    pub category2_id: Option<i64>,
}

/// Ebook Repository Port
#[async_trait]
pub trait EbookRepositoryPort: Send + Sync {
    /// 新增电子书
    async fn insert(&self, ebook: &EbookRecord) -> Result<(), RepositoryError>;

    /// 按 ID 更新可编辑字段（名称、分类、描述、封面），返回受影响行数
    async fn update(&self, ebook: &EbookRecord) -> Result<u64, RepositoryError>;

    /// 根据 ID 查找电子书
    async fn find_by_id(&self, id: i64) -> Result<Option<EbookRecord>, RepositoryError>;

    /// 分页查询
    async fn find_page(
        &self,
        filter: &EbookFilter,
        page: PageRequest,
    ) -> Result<Page<EbookRecord>, RepositoryError>;

    /// 删除电子书（不级联删除文档）
    async fn delete(&self, id: i64) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Doc Repository
// ============================================================================

/// 文档实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRecord {
    pub id: i64,
    pub ebook_id: i64,
    /// 父文档 ID，0 表示顶级文档
    pub parent: i64,
    pub name: String,
    pub sort: i64,
    pub view_count: i64,
    pub vote_count: i64,
}

/// 文档内容实体，与文档共享 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub id: i64,
    pub content: String,
}

/// Doc Repository Port
#[async_trait]
pub trait DocRepositoryPort: Send + Sync {
    /// 获取某本电子书下的全部文档，按 sort 升序
    async fn find_by_ebook(&self, ebook_id: i64) -> Result<Vec<DocRecord>, RepositoryError>;

    /// 分页查询
    async fn find_page(
        &self,
        ebook_id: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<DocRecord>, RepositoryError>;

    /// 根据 ID 查找文档
    async fn find_by_id(&self, id: i64) -> Result<Option<DocRecord>, RepositoryError>;

    /// 在同一事务中新增文档和内容
    async fn insert_with_content(
        &self,
        doc: &DocRecord,
        content: &ContentRecord,
    ) -> Result<(), RepositoryError>;

    /// 在同一事务中更新文档和内容，内容行不存在时补插
    ///
    /// 返回文档行的受影响行数
    async fn update_with_content(
        &self,
        doc: &DocRecord,
        content: &ContentRecord,
    ) -> Result<u64, RepositoryError>;

    /// 批量删除文档（不删除内容行）
    async fn delete_by_ids(&self, ids: &[i64]) -> Result<u64, RepositoryError>;

    /// 获取文档内容
    async fn find_content(&self, id: i64) -> Result<Option<ContentRecord>, RepositoryError>;

    /// 阅读数 + 1（原子自增）
    async fn increase_view_count(&self, id: i64) -> Result<u64, RepositoryError>;

    /// 点赞数 + 1（原子自增）
    async fn increase_vote_count(&self, id: i64) -> Result<u64, RepositoryError>;

    /// 将文档的数量、阅读数、点赞数汇总到所属电子书
    async fn refresh_ebook_counters(&self) -> Result<u64, RepositoryError>;
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub login_name: String,
    pub name: String,
    pub password: String,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 新增用户，登录名冲突时返回 `RepositoryError::Duplicate`
    async fn insert(&self, user: &UserRecord) -> Result<(), RepositoryError>;

    /// 只更新昵称，返回受影响行数
    async fn update_name(&self, id: i64, name: &str) -> Result<u64, RepositoryError>;

    /// 只更新密码，返回受影响行数
    async fn update_password(&self, id: i64, password: &str) -> Result<u64, RepositoryError>;

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepositoryError>;

    /// 根据登录名查找用户
    async fn find_by_login_name(
        &self,
        login_name: &str,
    ) -> Result<Option<UserRecord>, RepositoryError>;

    /// 分页查询，可按登录名精确过滤
    async fn find_page(
        &self,
        login_name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserRecord>, RepositoryError>;

    /// 删除用户
    async fn delete(&self, id: i64) -> Result<u64, RepositoryError>;
}
