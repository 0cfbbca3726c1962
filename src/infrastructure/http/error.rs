//! HTTP Error Handling
//!
//! 应用层错误到统一响应信封的映射

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ApiResponse;
use crate::application::ApplicationError;

/// 错误码定义
pub mod errno {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION: i32 = 400;
    pub const BUSINESS: i32 = 409;
    pub const SYSTEM: i32 = 500;
}

/// 系统异常对外统一展示的文案，细节只写日志
pub const SYSTEM_ERROR_MESSAGE: &str = "System error occurred. Please contact the administrator.";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 参数校验失败
    Validation(String),
    /// 业务异常
    Business(String),
    /// 未预期的系统异常
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match &self {
            ApiError::Validation(msg) => {
                tracing::warn!(code = errno::VALIDATION, error = %msg, "Validation failed");
                ApiResponse::error(errno::VALIDATION, msg.clone())
            }
            ApiError::Business(msg) => {
                tracing::warn!(code = errno::BUSINESS, error = %msg, "Business exception");
                ApiResponse::error(errno::BUSINESS, msg.clone())
            }
            ApiError::Internal(msg) => {
                tracing::error!(code = errno::SYSTEM, error = %msg, "System exception");
                ApiResponse::error(errno::SYSTEM, SYSTEM_ERROR_MESSAGE)
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::Validation(msg),
            ApplicationError::Business(code) => ApiError::Business(code.desc().to_string()),
            ApplicationError::NotFound { .. } => ApiError::Business(e.to_string()),
            ApplicationError::RepositoryError(_)
            | ApplicationError::ExternalServiceError(_)
            | ApplicationError::InternalError(_) => ApiError::Internal(e.to_string()),
        }
    }
}
