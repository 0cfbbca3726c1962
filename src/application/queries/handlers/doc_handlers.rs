//! Doc Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{DocRecord, DocRepositoryPort};
use crate::application::queries::{ListDocs, ListDocsByEbook};
use crate::domain::Page;

/// ListDocsByEbook Handler - 返回整本书的文档，前端据 parent 组装目录树
pub struct ListDocsByEbookHandler {
    doc_repo: Arc<dyn DocRepositoryPort>,
}

impl ListDocsByEbookHandler {
    pub fn new(doc_repo: Arc<dyn DocRepositoryPort>) -> Self {
        Self { doc_repo }
    }

    pub async fn handle(&self, query: ListDocsByEbook) -> Result<Vec<DocRecord>, ApplicationError> {
        Ok(self.doc_repo.find_by_ebook(query.ebook_id).await?)
    }
}

/// ListDocs Handler
pub struct ListDocsHandler {
    doc_repo: Arc<dyn DocRepositoryPort>,
}

impl ListDocsHandler {
    pub fn new(doc_repo: Arc<dyn DocRepositoryPort>) -> Self {
        Self { doc_repo }
    }

    pub async fn handle(&self, query: ListDocs) -> Result<Page<DocRecord>, ApplicationError> {
        let page = self.doc_repo.find_page(query.ebook_id, query.page).await?;

        tracing::info!(
            total = page.total,
            pages = query.page.total_pages(page.total),
            "Docs listed"
        );

        Ok(page)
    }
}
