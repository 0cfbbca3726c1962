//! User Query Handlers

use std::sync::Arc;

use crate::application::error::{ApplicationError, BusinessErrorCode};
use crate::application::ports::{UserRecord, UserRepositoryPort};
use crate::application::queries::{ListUsers, Login};
use crate::domain::Page;

// ============================================================================
// Response DTOs
// ============================================================================

/// 对外暴露的用户信息（不含密码）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: i64,
    pub login_name: String,
    pub name: String,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            login_name: record.login_name,
            name: record.name,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListUsers Handler
pub struct ListUsersHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl ListUsersHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: ListUsers) -> Result<Page<UserView>, ApplicationError> {
        let login_name = query
            .login_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let page = self.user_repo.find_page(login_name, query.page).await?;

        tracing::info!(
            total = page.total,
            pages = query.page.total_pages(page.total),
            "Users listed"
        );

        Ok(page.map(UserView::from))
    }
}

/// Login Handler
///
/// 用户不存在与密码错误返回同一个错误
pub struct LoginHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl LoginHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: Login) -> Result<UserView, ApplicationError> {
        let user = self.user_repo.find_by_login_name(&query.login_name).await?;

        match user {
            Some(user) if user.password == query.password => {
                tracing::info!(user_id = user.id, login_name = %user.login_name, "User logged in");
                Ok(UserView::from(user))
            }
            Some(_) => {
                tracing::info!(login_name = %query.login_name, "Login rejected: wrong password");
                Err(ApplicationError::business(BusinessErrorCode::LoginFailed))
            }
            None => {
                tracing::info!(login_name = %query.login_name, "Login rejected: unknown login name");
                Err(ApplicationError::business(BusinessErrorCode::LoginFailed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageRequest;
    use crate::infrastructure::persistence::sqlite::{test_pool, SqliteUserRepository};

    async fn seeded() -> Arc<SqliteUserRepository> {
        let repo = Arc::new(SqliteUserRepository::new(test_pool().await));
        for (id, login_name) in [(1, "alice"), (2, "bob"), (3, "carol")] {
            repo.insert(&UserRecord {
                id,
                login_name: login_name.to_string(),
                name: login_name.to_uppercase(),
                password: "abc123".to_string(),
            })
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_list_users_filters_by_exact_login_name() {
        let handler = ListUsersHandler::new(seeded().await);

        let page = handler
            .handle(ListUsers {
                login_name: Some("bob".to_string()),
                page: PageRequest::new(1, 10).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].login_name, "bob");

        let page = handler
            .handle(ListUsers {
                login_name: Some("bo".to_string()),
                page: PageRequest::new(1, 10).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 0);

        let page = handler
            .handle(ListUsers {
                login_name: None,
                page: PageRequest::new(1, 10).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_login_success() {
        let handler = LoginHandler::new(seeded().await);

        let user = handler
            .handle(Login {
                login_name: "alice".to_string(),
                password: "abc123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "ALICE");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let handler = LoginHandler::new(seeded().await);

        let unknown = handler
            .handle(Login {
                login_name: "nobody".to_string(),
                password: "abc123".to_string(),
            })
            .await
            .unwrap_err();
        let wrong = handler
            .handle(Login {
                login_name: "alice".to_string(),
                password: "wrong1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(
            wrong,
            ApplicationError::Business(BusinessErrorCode::LoginFailed)
        ));
    }
}
