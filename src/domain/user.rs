//! User Context - 用户凭据值对象

use serde::{Deserialize, Serialize};

/// 登录名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginName(String);

impl LoginName {
    pub fn new(login_name: impl Into<String>) -> Result<Self, &'static str> {
        let login_name = login_name.into();
        if login_name.trim().is_empty() {
            return Err("【用户名】不能为空");
        }
        if login_name.chars().count() > 50 {
            return Err("【用户名】长度不能超过50字符");
        }
        Ok(Self(login_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for LoginName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 密码
///
/// 6-32 位字母或数字，且不能全是数字或全是字母。
/// 只做等值比较，不在服务端做哈希
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Result<Self, &'static str> {
        let password = password.into();
        let len = password.len();
        if !(6..=32).contains(&len) || !password.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("【密码】至少包含数字和英文，长度6-32");
        }
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_alpha = password.chars().any(|c| c.is_ascii_alphabetic());
        if !has_digit || !has_alpha {
            return Err("【密码】至少包含数字和英文，长度6-32");
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// 避免密码出现在日志里
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}
