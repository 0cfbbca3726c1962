//! SQLite Ebook Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{EbookFilter, EbookRecord, EbookRepositoryPort, RepositoryError};
use crate::domain::{Page, PageRequest};

/// SQLite Ebook Repository
pub struct SqliteEbookRepository {
    pool: DbPool,
}

impl SqliteEbookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EbookRow {
    id: i64,
    name: String,
    category1_id: Option<i64>,
    category2_id: Option<i64>,
    description: Option<String>,
    cover: Option<String>,
    doc_count: i64,
    view_count: i64,
    vote_count: i64,
}

impl From<EbookRow> for EbookRecord {
    fn from(row: EbookRow) -> Self {
        EbookRecord {
            id: row.id,
            name: row.name,
            category1_id: row.category1_id,
            category2_id: row.category2_id,
            description: row.description,
            cover: row.cover,
            doc_count: row.doc_count,
            view_count: row.view_count,
            vote_count: row.vote_count,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, category1_id, category2_id, description, cover, doc_count, view_count, vote_count FROM ebooks";

// 条件为空时对应子句恒真，两条语句共用同一组绑定顺序
const FILTER_CLAUSE: &str =
    "WHERE (? IS NULL OR name LIKE ?) AND (? IS NULL OR category2_id = ?)";

#[async_trait]
impl EbookRepositoryPort for SqliteEbookRepository {
    async fn insert(&self, ebook: &EbookRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO ebooks (id, name, category1_id, category2_id, description, cover, doc_count, view_count, vote_count)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(ebook.id)
        .bind(&ebook.name)
        .bind(ebook.category1_id)
        .bind(ebook.category2_id)
        .bind(&ebook.description)
        .bind(&ebook.cover)
        .bind(ebook.doc_count)
        .bind(ebook.view_count)
        .bind(ebook.vote_count)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update(&self, ebook: &EbookRecord) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE ebooks
            SET name = ?, category1_id = ?, category2_id = ?, description = ?, cover = ?
            WHERE id = ?
            "#,
        )
        .bind(&ebook.name)
        .bind(ebook.category1_id)
        .bind(ebook.category2_id)
        .bind(&ebook.description)
        .bind(&ebook.cover)
        .bind(ebook.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EbookRecord>, RepositoryError> {
        let row: Option<EbookRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(EbookRecord::from))
    }

    async fn find_page(
        &self,
        filter: &EbookFilter,
        page: PageRequest,
    ) -> Result<Page<EbookRecord>, RepositoryError> {
        let pattern = filter.name.as_ref().map(|name| format!("%{}%", name));

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM ebooks {}", FILTER_CLAUSE))
                .bind(&filter.name)
                .bind(&pattern)
                .bind(filter.category2_id)
                .bind(filter.category2_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<EbookRow> = sqlx::query_as(&format!(
            "{} {} ORDER BY id LIMIT ? OFFSET ?",
            SELECT_COLUMNS, FILTER_CLAUSE
        ))
        .bind(&filter.name)
        .bind(&pattern)
        .bind(filter.category2_id)
        .bind(filter.category2_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Page::new(
            total as u64,
            rows.into_iter().map(EbookRecord::from).collect(),
        ))
    }

    async fn delete(&self, id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM ebooks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::test_pool;

    fn ebook(id: i64, name: &str) -> EbookRecord {
        EbookRecord {
            id,
            name: name.to_string(),
            category1_id: Some(1),
            category2_id: Some(2),
            description: Some("desc".to_string()),
            cover: Some("/cover.png".to_string()),
            doc_count: 0,
            view_count: 0,
            vote_count: 0,
        }
    }

    #[tokio::test]
    async fn test_update_does_not_touch_counters() {
        let pool = test_pool().await;
        let repo = SqliteEbookRepository::new(pool.clone());
        repo.insert(&ebook(1, "Go")).await.unwrap();

        sqlx::query("UPDATE ebooks SET view_count = 9 WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let mut changed = ebook(1, "Go 2");
        changed.view_count = 0;
        assert_eq!(repo.update(&changed).await.unwrap(), 1);

        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Go 2");
        assert_eq!(stored.view_count, 9);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = SqliteEbookRepository::new(test_pool().await);

        assert_eq!(repo.update(&ebook(404, "x")).await.unwrap(), 0);
        assert_eq!(repo.delete(404).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_page_orders_by_id() {
        let repo = SqliteEbookRepository::new(test_pool().await);
        for id in [3, 1, 2] {
            repo.insert(&ebook(id, &format!("book-{}", id))).await.unwrap();
        }

        let page = repo
            .find_page(&EbookFilter::default(), PageRequest::new(2, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].id, 3);
    }
}
