//! Ebook Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeleteEbook, SaveEbook};
use crate::application::error::ApplicationError;
use crate::application::ports::{EbookRecord, EbookRepositoryPort, IdGeneratorPort};

// ============================================================================
// SaveEbook
// ============================================================================

/// SaveEbook Handler - 新增或更新电子书
pub struct SaveEbookHandler {
    ebook_repo: Arc<dyn EbookRepositoryPort>,
    id_generator: Arc<dyn IdGeneratorPort>,
}

impl SaveEbookHandler {
    pub fn new(
        ebook_repo: Arc<dyn EbookRepositoryPort>,
        id_generator: Arc<dyn IdGeneratorPort>,
    ) -> Self {
        Self {
            ebook_repo,
            id_generator,
        }
    }

    pub async fn handle(&self, command: SaveEbook) -> Result<EbookRecord, ApplicationError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ApplicationError::validation("【名称】不能为空"));
        }

        let mut ebook = EbookRecord {
            id: 0,
            name: name.to_string(),
            category1_id: command.category1_id,
            category2_id: command.category2_id,
            description: command.description,
            cover: command.cover,
            doc_count: 0,
            view_count: 0,
            vote_count: 0,
        };

        match command.id {
            None => {
                ebook.id = self.id_generator.next_id()?;
                self.ebook_repo.insert(&ebook).await?;

                tracing::info!(ebook_id = ebook.id, name = %ebook.name, "Ebook created");
                Ok(ebook)
            }
            Some(id) => {
                ebook.id = id;
                let affected = self.ebook_repo.update(&ebook).await?;
                if affected == 0 {
                    return Err(ApplicationError::not_found("Ebook", id));
                }

                tracing::info!(ebook_id = id, name = %ebook.name, "Ebook updated");

                // 统计字段由数据库维护，重新读取
                self.ebook_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Ebook", id))
            }
        }
    }
}

// ============================================================================
// DeleteEbook
// ============================================================================

/// DeleteEbook Handler
///
/// 不级联删除该电子书下的文档
pub struct DeleteEbookHandler {
    ebook_repo: Arc<dyn EbookRepositoryPort>,
}

impl DeleteEbookHandler {
    pub fn new(ebook_repo: Arc<dyn EbookRepositoryPort>) -> Self {
        Self { ebook_repo }
    }

    pub async fn handle(&self, command: DeleteEbook) -> Result<(), ApplicationError> {
        let affected = self.ebook_repo.delete(command.ebook_id).await?;

        tracing::info!(ebook_id = command.ebook_id, affected = affected, "Ebook deleted");

        Ok(())
    }
}
