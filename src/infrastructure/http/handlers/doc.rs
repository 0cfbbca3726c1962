//! Doc HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    DeleteDocs, DocRecord, ListDocs, ListDocsByEbook, ReadDocContent, RefreshEbookCounters,
    SaveDoc, VoteDoc,
};
use crate::infrastructure::http::dto::{page_request, ApiResponse, PageResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::{
    require_not_blank, ClientAddr, ValidJson, ValidPath, ValidQuery, Validate,
};
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocQueryRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub ebook_id: Option<i64>,
}

impl Validate for DocQueryRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSaveRequest {
    pub id: Option<i64>,
    pub ebook_id: i64,
    pub parent: i64,
    pub name: String,
    pub sort: i64,
    #[serde(default)]
    pub content: String,
}

impl Validate for DocSaveRequest {
    fn validate(&self) -> Result<(), String> {
        require_not_blank(&self.name, "【名称】不能为空")
    }
}

#[derive(Debug, Deserialize)]
pub struct DocDeleteRequest {
    pub ids: Vec<i64>,
}

impl Validate for DocDeleteRequest {
    fn validate(&self) -> Result<(), String> {
        if self.ids.is_empty() {
            return Err("【ID列表】不能为空".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocResponse {
    pub id: i64,
    pub ebook_id: i64,
    pub parent: i64,
    pub name: String,
    pub sort: i64,
    pub view_count: i64,
    pub vote_count: i64,
}

impl From<DocRecord> for DocResponse {
    fn from(record: DocRecord) -> Self {
        Self {
            id: record.id,
            ebook_id: record.ebook_id,
            parent: record.parent,
            name: record.name,
            sort: record.sort,
            view_count: record.view_count,
            vote_count: record.vote_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct RefreshedResponse {
    pub ebooks: u64,
}

// ============================================================================
// Handlers
// ============================================================================

/// 获取一本电子书的全部文档
pub async fn list_docs_by_ebook(
    State(state): State<Arc<AppState>>,
    ValidPath(ebook_id): ValidPath<i64>,
) -> Result<Json<ApiResponse<Vec<DocResponse>>>, ApiError> {
    let docs = state
        .list_docs_by_ebook_handler
        .handle(ListDocsByEbook { ebook_id })
        .await?;

    Ok(Json(ApiResponse::success(
        docs.into_iter().map(DocResponse::from).collect(),
    )))
}

/// 分页查询文档
pub async fn list_docs(
    State(state): State<Arc<AppState>>,
    ValidQuery(req): ValidQuery<DocQueryRequest>,
) -> Result<Json<ApiResponse<PageResponse<DocResponse>>>, ApiError> {
    let query = ListDocs {
        ebook_id: req.ebook_id,
        page: page_request(req.page_num, req.page_size)?,
    };

    let page = state.list_docs_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        DocResponse::from,
    ))))
}

/// 保存文档及内容
pub async fn save_doc(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<DocSaveRequest>,
) -> Result<Json<ApiResponse<DocResponse>>, ApiError> {
    let command = SaveDoc {
        id: req.id,
        ebook_id: req.ebook_id,
        parent: req.parent,
        name: req.name,
        sort: req.sort,
        content: req.content,
    };

    let doc = state.save_doc_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(DocResponse::from(doc))))
}

/// 批量删除文档
pub async fn delete_docs(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<DocDeleteRequest>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let deleted = state
        .delete_docs_handler
        .handle(DeleteDocs { ids: req.ids })
        .await?;

    Ok(Json(ApiResponse::success(DeletedResponse { deleted })))
}

/// 读取文档内容，阅读数 + 1
pub async fn read_doc_content(
    State(state): State<Arc<AppState>>,
    ValidPath(doc_id): ValidPath<i64>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let content = state
        .read_doc_content_handler
        .handle(ReadDocContent { doc_id })
        .await?;

    Ok(Json(ApiResponse::success(content)))
}

/// 点赞
pub async fn vote_doc(
    State(state): State<Arc<AppState>>,
    ClientAddr(voter_addr): ClientAddr,
    ValidPath(doc_id): ValidPath<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .vote_doc_handler
        .handle(VoteDoc { doc_id, voter_addr })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 立即刷新电子书统计
pub async fn refresh_counters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RefreshedResponse>>, ApiError> {
    let ebooks = state
        .refresh_counters_handler
        .handle(RefreshEbookCounters)
        .await?;

    Ok(Json(ApiResponse::success(RefreshedResponse { ebooks })))
}
