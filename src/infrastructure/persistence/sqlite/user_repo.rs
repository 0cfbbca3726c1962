//! SQLite User Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, UserRecord, UserRepositoryPort};
use crate::domain::{Page, PageRequest};

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    login_name: String,
    name: String,
    password: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id,
            login_name: row.login_name,
            name: row.name,
            password: row.password,
        }
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn insert(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (id, login_name, name, password) VALUES (?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.login_name)
        .bind(&user.name)
        .bind(&user.password)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::Duplicate(user.login_name.clone()))
            }
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE users SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn update_password(&self, id: i64, password: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, login_name, name, password FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_login_name(
        &self,
        login_name: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, login_name, name, password FROM users WHERE login_name = ?")
                .bind(login_name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_page(
        &self,
        login_name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserRecord>, RepositoryError> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE (? IS NULL OR login_name = ?)")
                .bind(login_name)
                .bind(login_name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, login_name, name, password FROM users
            WHERE (? IS NULL OR login_name = ?)
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(login_name)
        .bind(login_name)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Page::new(
            total as u64,
            rows.into_iter().map(UserRecord::from).collect(),
        ))
    }

    async fn delete(&self, id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
