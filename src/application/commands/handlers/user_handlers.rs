//! User Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeleteUser, ResetPassword, SaveUser};
use crate::application::error::{ApplicationError, BusinessErrorCode};
use crate::application::ports::{IdGeneratorPort, RepositoryError, UserRecord, UserRepositoryPort};
use crate::domain::{LoginName, Password};

// ============================================================================
// SaveUser
// ============================================================================

/// SaveUser Handler - 新增或更新用户
pub struct SaveUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    id_generator: Arc<dyn IdGeneratorPort>,
}

impl SaveUserHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        id_generator: Arc<dyn IdGeneratorPort>,
    ) -> Self {
        Self {
            user_repo,
            id_generator,
        }
    }

    pub async fn handle(&self, command: SaveUser) -> Result<UserRecord, ApplicationError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ApplicationError::validation("【昵称】不能为空"));
        }

        match command.id {
            None => self.create(command.login_name, name, command.password).await,
            Some(id) => self.update(id, name).await,
        }
    }

    /// 新增前先按登录名查重
    ///
    /// 查重与插入之间存在竞争窗口，由 login_name 唯一索引兜底
    async fn create(
        &self,
        login_name: String,
        name: &str,
        password: Option<String>,
    ) -> Result<UserRecord, ApplicationError> {
        let login_name = LoginName::new(login_name).map_err(ApplicationError::validation)?;
        let password = password.ok_or_else(|| ApplicationError::validation("【密码】不能为空"))?;
        let password = Password::new(password).map_err(ApplicationError::validation)?;

        if self
            .user_repo
            .find_by_login_name(login_name.as_str())
            .await?
            .is_some()
        {
            return Err(ApplicationError::business(BusinessErrorCode::LoginNameExists));
        }

        let user = UserRecord {
            id: self.id_generator.next_id()?,
            login_name: login_name.into_inner(),
            name: name.to_string(),
            password: password.into_inner(),
        };

        match self.user_repo.insert(&user).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate(_)) => {
                return Err(ApplicationError::business(BusinessErrorCode::LoginNameExists));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = user.id, login_name = %user.login_name, "User created");

        Ok(user)
    }

    /// 更新时只写昵称，登录名和密码不受请求内容影响
    async fn update(&self, id: i64, name: &str) -> Result<UserRecord, ApplicationError> {
        let affected = self.user_repo.update_name(id, name).await?;
        if affected == 0 {
            return Err(ApplicationError::not_found("User", id));
        }

        tracing::info!(user_id = id, "User updated");

        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", id))
    }
}

// ============================================================================
// DeleteUser
// ============================================================================

/// DeleteUser Handler
pub struct DeleteUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl DeleteUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: DeleteUser) -> Result<(), ApplicationError> {
        let affected = self.user_repo.delete(command.user_id).await?;

        tracing::info!(user_id = command.user_id, affected = affected, "User deleted");

        Ok(())
    }
}

// ============================================================================
// ResetPassword
// ============================================================================

/// ResetPassword Handler - 只更新密码
pub struct ResetPasswordHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl ResetPasswordHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: ResetPassword) -> Result<(), ApplicationError> {
        let password = Password::new(command.password).map_err(ApplicationError::validation)?;

        let affected = self
            .user_repo
            .update_password(command.user_id, password.as_str())
            .await?;
        if affected == 0 {
            return Err(ApplicationError::not_found("User", command.user_id));
        }

        tracing::info!(user_id = command.user_id, "User password reset");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::id::SnowflakeIdGenerator;
    use crate::infrastructure::persistence::sqlite::{test_pool, SqliteUserRepository};

    async fn setup() -> (Arc<SqliteUserRepository>, SaveUserHandler) {
        let pool = test_pool().await;
        let repo = Arc::new(SqliteUserRepository::new(pool));
        let handler = SaveUserHandler::new(repo.clone(), Arc::new(SnowflakeIdGenerator::new(1, 1)));
        (repo, handler)
    }

    fn create_command(login_name: &str) -> SaveUser {
        SaveUser {
            id: None,
            login_name: login_name.to_string(),
            name: "Sam".to_string(),
            password: Some("abc123".to_string()),
        }
    }

    #[tokio::test]
    async fn test_duplicate_login_name_is_rejected() {
        let (repo, handler) = setup().await;

        let first = handler.handle(create_command("sam")).await.unwrap();
        let second = handler.handle(create_command("sam")).await;

        assert!(matches!(
            second,
            Err(ApplicationError::Business(BusinessErrorCode::LoginNameExists))
        ));

        let stored = repo.find_by_login_name("sam").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
    }

    #[tokio::test]
    async fn test_update_ignores_login_name_and_password() {
        let (repo, handler) = setup().await;
        let created = handler.handle(create_command("sam")).await.unwrap();

        let updated = handler
            .handle(SaveUser {
                id: Some(created.id),
                login_name: "hacker".to_string(),
                name: "Samuel".to_string(),
                password: Some("zzz999".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Samuel");
        assert_eq!(updated.login_name, "sam");
        assert_eq!(updated.password, "abc123");

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_create_requires_valid_password() {
        let (_repo, handler) = setup().await;

        let mut command = create_command("sam");
        command.password = None;
        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::ValidationError(_))
        ));

        let mut command = create_command("sam");
        command.password = Some("123456".to_string());
        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_password_only_changes_password() {
        let (repo, handler) = setup().await;
        let created = handler.handle(create_command("sam")).await.unwrap();

        let reset = ResetPasswordHandler::new(repo.clone());
        reset
            .handle(ResetPassword {
                user_id: created.id,
                password: "new456pwd".to_string(),
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.password, "new456pwd");
        assert_eq!(stored.login_name, "sam");
        assert_eq!(stored.name, "Sam");

        let missing = reset
            .handle(ResetPassword {
                user_id: 1,
                password: "new456pwd".to_string(),
            })
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (repo, handler) = setup().await;
        let created = handler.handle(create_command("sam")).await.unwrap();

        DeleteUserHandler::new(repo.clone())
            .handle(DeleteUser {
                user_id: created.id,
            })
            .await
            .unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
