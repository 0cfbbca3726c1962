//! Data Transfer Objects
//!
//! 统一响应信封与分页参数；各接口的请求/响应 DTO 定义在对应的 handler 文件中

use serde::Serialize;

use super::error::{errno, ApiError};
use crate::domain::{Page, PageRequest};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式，HTTP 状态码始终为 200，由 `code` 区分成功与失败
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            code: errno::SUCCESS,
            message: String::new(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            code: errno::SUCCESS,
            message: String::new(),
            data: None,
        }
    }

    /// 错误响应
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// 分页
// ============================================================================

/// 分页响应
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub total: u64,
    pub list: Vec<T>,
}

impl<T: Serialize> PageResponse<T> {
    pub fn from_page<R>(page: Page<R>, f: impl FnMut(R) -> T) -> Self {
        let page = page.map(f);
        Self {
            total: page.total,
            list: page.list,
        }
    }
}

/// 把 pageNum / pageSize 转成分页请求
pub fn page_request(page_num: u32, page_size: u32) -> Result<PageRequest, ApiError> {
    PageRequest::new(page_num, page_size).map_err(|msg| ApiError::Validation(msg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(json, serde_json::json!({"code": 0, "message": "", "data": 42}));
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let json = serde_json::to_value(ApiResponse::error(409, "您已点赞过")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": 409, "message": "您已点赞过", "data": null})
        );
    }

    #[test]
    fn test_invalid_page_is_validation_error() {
        assert!(matches!(page_request(0, 10), Err(ApiError::Validation(_))));
        assert!(page_request(1, 10).is_ok());
    }
}
