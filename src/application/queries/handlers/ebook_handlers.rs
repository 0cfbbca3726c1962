//! Ebook Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{EbookFilter, EbookRecord, EbookRepositoryPort};
use crate::application::queries::ListEbooks;
use crate::domain::Page;

/// ListEbooks Handler
pub struct ListEbooksHandler {
    ebook_repo: Arc<dyn EbookRepositoryPort>,
}

impl ListEbooksHandler {
    pub fn new(ebook_repo: Arc<dyn EbookRepositoryPort>) -> Self {
        Self { ebook_repo }
    }

    pub async fn handle(&self, query: ListEbooks) -> Result<Page<EbookRecord>, ApplicationError> {
        // 空白名称视为不过滤
        let filter = EbookFilter {
            name: query
                .filter
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            category2_id: query.filter.category2_id,
        };

        let page = self.ebook_repo.find_page(&filter, query.page).await?;

        tracing::info!(
            total = page.total,
            pages = query.page.total_pages(page.total),
            "Ebooks listed"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageRequest;
    use crate::infrastructure::persistence::sqlite::{test_pool, SqliteEbookRepository};

    fn ebook(id: i64, name: &str, category2_id: Option<i64>) -> EbookRecord {
        EbookRecord {
            id,
            name: name.to_string(),
            category1_id: None,
            category2_id,
            description: None,
            cover: None,
            doc_count: 0,
            view_count: 0,
            vote_count: 0,
        }
    }

    async fn seeded() -> ListEbooksHandler {
        let repo = Arc::new(SqliteEbookRepository::new(test_pool().await));
        repo.insert(&ebook(1, "Rust 编程之道", Some(10))).await.unwrap();
        repo.insert(&ebook(2, "Go 语言实战", Some(20))).await.unwrap();
        repo.insert(&ebook(3, "Rust 异步", Some(20))).await.unwrap();
        ListEbooksHandler::new(repo)
    }

    #[tokio::test]
    async fn test_filter_by_name_and_category() {
        let handler = seeded().await;

        let page = handler
            .handle(ListEbooks {
                filter: EbookFilter {
                    name: Some("Rust".to_string()),
                    category2_id: None,
                },
                page: PageRequest::new(1, 10).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 2);

        let page = handler
            .handle(ListEbooks {
                filter: EbookFilter {
                    name: Some("Rust".to_string()),
                    category2_id: Some(20),
                },
                page: PageRequest::new(1, 10).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].id, 3);
    }

    #[tokio::test]
    async fn test_blank_name_does_not_filter() {
        let handler = seeded().await;

        let page = handler
            .handle(ListEbooks {
                filter: EbookFilter {
                    name: Some("  ".to_string()),
                    category2_id: None,
                },
                page: PageRequest::new(1, 2).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.list.len(), 2);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_with_total() {
        let handler = seeded().await;

        let page = handler
            .handle(ListEbooks {
                filter: EbookFilter::default(),
                page: PageRequest::new(5, 10).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert!(page.list.is_empty());
    }
}
