//! SQLite Doc Repository
//!
//! 文档与内容分表存储，共享同一个 ID

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{ContentRecord, DocRecord, DocRepositoryPort, RepositoryError};
use crate::domain::{Page, PageRequest};

/// SQLite Doc Repository
pub struct SqliteDocRepository {
    pool: DbPool,
}

impl SqliteDocRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct DocRow {
    id: i64,
    ebook_id: i64,
    parent: i64,
    name: String,
    sort: i64,
    view_count: i64,
    vote_count: i64,
}

impl From<DocRow> for DocRecord {
    fn from(row: DocRow) -> Self {
        DocRecord {
            id: row.id,
            ebook_id: row.ebook_id,
            parent: row.parent,
            name: row.name,
            sort: row.sort,
            view_count: row.view_count,
            vote_count: row.vote_count,
        }
    }
}

#[derive(FromRow)]
struct ContentRow {
    id: i64,
    content: String,
}

const SELECT_COLUMNS: &str =
    "SELECT id, ebook_id, parent, name, sort, view_count, vote_count FROM docs";

#[async_trait]
impl DocRepositoryPort for SqliteDocRepository {
    async fn find_by_ebook(&self, ebook_id: i64) -> Result<Vec<DocRecord>, RepositoryError> {
        let rows: Vec<DocRow> = sqlx::query_as(&format!(
            "{} WHERE ebook_id = ? ORDER BY sort, id",
            SELECT_COLUMNS
        ))
        .bind(ebook_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(DocRecord::from).collect())
    }

    async fn find_page(
        &self,
        ebook_id: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<DocRecord>, RepositoryError> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM docs WHERE (? IS NULL OR ebook_id = ?)")
                .bind(ebook_id)
                .bind(ebook_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<DocRow> = sqlx::query_as(&format!(
            "{} WHERE (? IS NULL OR ebook_id = ?) ORDER BY sort, id LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(ebook_id)
        .bind(ebook_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Page::new(
            total as u64,
            rows.into_iter().map(DocRecord::from).collect(),
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<DocRecord>, RepositoryError> {
        let row: Option<DocRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(DocRecord::from))
    }

    async fn insert_with_content(
        &self,
        doc: &DocRecord,
        content: &ContentRecord,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO docs (id, ebook_id, parent, name, sort, view_count, vote_count)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(doc.id)
        .bind(doc.ebook_id)
        .bind(doc.parent)
        .bind(&doc.name)
        .bind(doc.sort)
        .bind(doc.view_count)
        .bind(doc.vote_count)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("INSERT INTO contents (id, content) VALUES (?, ?)")
            .bind(content.id)
            .bind(&content.content)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update_with_content(
        &self,
        doc: &DocRecord,
        content: &ContentRecord,
    ) -> Result<u64, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let affected = sqlx::query(
            r#"
            UPDATE docs
            SET ebook_id = ?, parent = ?, name = ?, sort = ?
            WHERE id = ?
            "#,
        )
        .bind(doc.ebook_id)
        .bind(doc.parent)
        .bind(&doc.name)
        .bind(doc.sort)
        .bind(doc.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
        .rows_affected();

        // 文档不存在：事务随 tx 丢弃回滚，不补写内容
        if affected == 0 {
            return Ok(0);
        }

        let content_affected = sqlx::query("UPDATE contents SET content = ? WHERE id = ?")
            .bind(&content.content)
            .bind(content.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .rows_affected();

        if content_affected == 0 {
            tracing::debug!(doc_id = content.id, "Content row missing, inserting");

            sqlx::query("INSERT INTO contents (id, content) VALUES (?, ?)")
                .bind(content.id)
                .bind(&content.content)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(affected)
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        // 构建 IN 子句的占位符
        let placeholders: Vec<&str> = ids.iter().map(|_| "?").collect();
        let query = format!(
            "DELETE FROM docs WHERE id IN ({})",
            placeholders.join(", ")
        );

        let mut sql_query = sqlx::query(&query);
        for id in ids {
            sql_query = sql_query.bind(*id);
        }

        let result = sql_query
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn find_content(&self, id: i64) -> Result<Option<ContentRecord>, RepositoryError> {
        let row: Option<ContentRow> =
            sqlx::query_as("SELECT id, content FROM contents WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| ContentRecord {
            id: row.id,
            content: row.content,
        }))
    }

    async fn increase_view_count(&self, id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE docs SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn increase_vote_count(&self, id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE docs SET vote_count = vote_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn refresh_ebook_counters(&self) -> Result<u64, RepositoryError> {
        // 没有文档的电子书归零
        let result = sqlx::query(
            r#"
            UPDATE ebooks SET
                doc_count = (SELECT COUNT(*) FROM docs d WHERE d.ebook_id = ebooks.id),
                view_count = (SELECT COALESCE(SUM(d.view_count), 0) FROM docs d WHERE d.ebook_id = ebooks.id),
                vote_count = (SELECT COALESCE(SUM(d.vote_count), 0) FROM docs d WHERE d.ebook_id = ebooks.id)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
