//! Ebook HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{DeleteEbook, EbookFilter, EbookRecord, ListEbooks, SaveEbook};
use crate::infrastructure::http::dto::{page_request, ApiResponse, PageResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::{
    require_not_blank, ValidJson, ValidPath, ValidQuery, Validate,
};
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbookQueryRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub name: Option<String>,
    pub category_id2: Option<i64>,
}

impl Validate for EbookQueryRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbookSaveRequest {
    pub id: Option<i64>,
    pub name: String,
    pub category1_id: Option<i64>,
    pub category2_id: Option<i64>,
    pub description: Option<String>,
    pub cover: Option<String>,
}

impl Validate for EbookSaveRequest {
    fn validate(&self) -> Result<(), String> {
        require_not_blank(&self.name, "【名称】不能为空")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EbookResponse {
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

impl From<EbookRecord> for EbookResponse {
    fn from(record: EbookRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            category1_id: record.category1_id,
            category2_id: record.category2_id,
            description: record.description,
            cover: record.cover,
            doc_count: record.doc_count,
            view_count: record.view_count,
            vote_count: record.vote_count,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 分页查询电子书
pub async fn list_ebooks(
    State(state): State<Arc<AppState>>,
    ValidQuery(req): ValidQuery<EbookQueryRequest>,
) -> Result<Json<ApiResponse<PageResponse<EbookResponse>>>, ApiError> {
    let query = ListEbooks {
        filter: EbookFilter {
            name: req.name,
            category2_id: req.category_id2,
        },
        page: page_request(req.page_num, req.page_size)?,
    };

    let page = state.list_ebooks_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        EbookResponse::from,
    ))))
}

/// 保存电子书
pub async fn save_ebook(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<EbookSaveRequest>,
) -> Result<Json<ApiResponse<EbookResponse>>, ApiError> {
    let command = SaveEbook {
        id: req.id,
        name: req.name,
        category1_id: req.category1_id,
        category2_id: req.category2_id,
        description: req.description,
        cover: req.cover,
    };

    let ebook = state.save_ebook_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(EbookResponse::from(ebook))))
}

/// 删除电子书
pub async fn delete_ebook(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .delete_ebook_handler
        .handle(DeleteEbook { ebook_id: id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
