//! User Queries

use crate::domain::PageRequest;

/// 分页查询用户
#[derive(Debug, Clone)]
pub struct ListUsers {
    /// 登录名精确匹配
    pub login_name: Option<String>,
    pub page: PageRequest,
}

/// 登录校验
#[derive(Clone)]
pub struct Login {
    pub login_name: String,
    pub password: String,
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("login_name", &self.login_name)
            .field("password", &"***")
            .finish()
    }
}
