//! User HTTP Handlers
//!
//! 请求体中的密码不写日志

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    DeleteUser, ListUsers, Login, ResetPassword, SaveUser, UserRecord, UserView,
};
use crate::domain::{LoginName, Password};
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
pub struct UserQueryRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub login_name: Option<String>,
}

impl Validate for UserQueryRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSaveRequest {
    pub id: Option<i64>,
    pub login_name: String,
    pub name: String,
    pub password: Option<String>,
}

impl Validate for UserSaveRequest {
    fn validate(&self) -> Result<(), String> {
        LoginName::new(self.login_name.clone()).map_err(str::to_string)?;
        require_not_blank(&self.name, "【昵称】不能为空")?;
        if let Some(password) = &self.password {
            Password::new(password.clone()).map_err(str::to_string)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub id: i64,
    pub password: String,
}

impl Validate for ResetPasswordRequest {
    fn validate(&self) -> Result<(), String> {
        Password::new(self.password.clone())
            .map(|_| ())
            .map_err(str::to_string)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_name: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        require_not_blank(&self.login_name, "【用户名】不能为空")?;
        require_not_blank(&self.password, "【密码】不能为空")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub login_name: String,
    pub name: String,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id,
            login_name: view.login_name,
            name: view.name,
        }
    }
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        UserResponse::from(UserView::from(record))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 分页查询用户
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    ValidQuery(req): ValidQuery<UserQueryRequest>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let query = ListUsers {
        login_name: req.login_name,
        page: page_request(req.page_num, req.page_size)?,
    };

    let page = state.list_users_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        UserResponse::from,
    ))))
}

/// 保存用户
pub async fn save_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UserSaveRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let command = SaveUser {
        id: req.id,
        login_name: req.login_name,
        name: req.name,
        password: req.password,
    };

    let user = state.save_user_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// 删除用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .delete_user_handler
        .handle(DeleteUser { user_id: id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 重置密码
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .reset_password_handler
        .handle(ResetPassword {
            user_id: req.id,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 登录校验，不签发 token
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .login_handler
        .handle(Login {
            login_name: req.login_name,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}
