//! User Commands

/// 保存用户命令
///
/// 新增时必须提供密码；更新时登录名与密码均被忽略
#[derive(Debug, Clone)]
pub struct SaveUser {
    pub id: Option<i64>,
    pub login_name: String,
    pub name: String,
    pub password: Option<String>,
}

/// 删除用户命令
#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub user_id: i64,
}

/// 重置密码命令
#[derive(Debug, Clone)]
pub struct ResetPassword {
    pub user_id: i64,
    pub password: String,
}
