//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{GuardError, IdError, RepositoryError};

/// 业务异常码
///
/// 每个异常码对应一段固定的描述文本，直接返回给调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessErrorCode {
    /// 登录名已存在
    LoginNameExists,
    /// 用户名不存在或密码错误
    LoginFailed,
    /// 窗口期内重复点赞
    VoteRepeated,
}

impl BusinessErrorCode {
    pub fn desc(&self) -> &'static str {
        match self {
            BusinessErrorCode::LoginNameExists => "登录名已存在",
            BusinessErrorCode::LoginFailed => "用户名不存在或密码错误",
            BusinessErrorCode::VoteRepeated => "您已点赞过",
        }
    }
}

impl std::fmt::Display for BusinessErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.desc())
    }
}

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: i64,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 业务规则违反
    #[error("Business rule violation: {0}")]
    Business(BusinessErrorCode),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建业务异常
    pub fn business(code: BusinessErrorCode) -> Self {
        Self::Business(code)
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<GuardError> for ApplicationError {
    fn from(err: GuardError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<IdError> for ApplicationError {
    fn from(err: IdError) -> Self {
        Self::InternalError(err.to_string())
    }
}
