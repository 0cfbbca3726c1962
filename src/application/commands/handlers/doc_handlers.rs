//! Doc Command Handlers

use std::sync::Arc;
use std::time::Duration;

use crate::application::commands::{
    DeleteDocs, ReadDocContent, RefreshEbookCounters, SaveDoc, VoteDoc,
};
use crate::application::error::{ApplicationError, BusinessErrorCode};
use crate::application::ports::{
    ContentRecord, DocRecord, DocRepositoryPort, IdGeneratorPort, NotifierPort, VoteGuardPort,
};
use crate::domain::{vote_dedup_key, vote_message, VOTE_TOPIC};

// ============================================================================
// SaveDoc
// ============================================================================

/// SaveDoc Handler - 新增或更新文档及其内容
pub struct SaveDocHandler {
    doc_repo: Arc<dyn DocRepositoryPort>,
    id_generator: Arc<dyn IdGeneratorPort>,
}

impl SaveDocHandler {
    pub fn new(doc_repo: Arc<dyn DocRepositoryPort>, id_generator: Arc<dyn IdGeneratorPort>) -> Self {
        Self {
            doc_repo,
            id_generator,
        }
    }

    pub async fn handle(&self, command: SaveDoc) -> Result<DocRecord, ApplicationError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ApplicationError::validation("【名称】不能为空"));
        }

        let mut doc = DocRecord {
            id: 0,
            ebook_id: command.ebook_id,
            parent: command.parent,
            name: name.to_string(),
            sort: command.sort,
            view_count: 0,
            vote_count: 0,
        };

        match command.id {
            None => {
                doc.id = self.id_generator.next_id()?;
                let content = ContentRecord {
                    id: doc.id,
                    content: command.content,
                };
                self.doc_repo.insert_with_content(&doc, &content).await?;

                tracing::info!(doc_id = doc.id, ebook_id = doc.ebook_id, name = %doc.name, "Doc created");
                Ok(doc)
            }
            Some(id) => {
                doc.id = id;
                let content = ContentRecord {
                    id,
                    content: command.content,
                };
                let affected = self.doc_repo.update_with_content(&doc, &content).await?;
                if affected == 0 {
                    return Err(ApplicationError::not_found("Doc", id));
                }

                tracing::info!(doc_id = id, name = %doc.name, "Doc updated");

                self.doc_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Doc", id))
            }
        }
    }
}

// ============================================================================
// DeleteDocs
// ============================================================================

/// DeleteDocs Handler
///
/// 只删除文档行，内容行保留
pub struct DeleteDocsHandler {
    doc_repo: Arc<dyn DocRepositoryPort>,
}

impl DeleteDocsHandler {
    pub fn new(doc_repo: Arc<dyn DocRepositoryPort>) -> Self {
        Self { doc_repo }
    }

    pub async fn handle(&self, command: DeleteDocs) -> Result<u64, ApplicationError> {
        if command.ids.is_empty() {
            return Err(ApplicationError::validation("【ID列表】不能为空"));
        }

        let affected = self.doc_repo.delete_by_ids(&command.ids).await?;

        tracing::info!(requested = command.ids.len(), affected = affected, "Docs deleted");

        Ok(affected)
    }
}

// ============================================================================
// ReadDocContent
// ============================================================================

/// ReadDocContent Handler - 读取内容并使阅读数 + 1
pub struct ReadDocContentHandler {
    doc_repo: Arc<dyn DocRepositoryPort>,
}

impl ReadDocContentHandler {
    pub fn new(doc_repo: Arc<dyn DocRepositoryPort>) -> Self {
        Self { doc_repo }
    }

    /// 内容不存在时返回空字符串，阅读数照常 + 1
    pub async fn handle(&self, command: ReadDocContent) -> Result<String, ApplicationError> {
        let content = self.doc_repo.find_content(command.doc_id).await?;
        self.doc_repo.increase_view_count(command.doc_id).await?;

        Ok(content.map(|c| c.content).unwrap_or_default())
    }
}

// ============================================================================
// VoteDoc
// ============================================================================

/// VoteDoc Handler - 点赞
///
/// 1. 去重：以 (文档 ID, 来源地址) 为 key 在缓存中原子写入带过期时间的标记，
///    已存在则直接拒绝，不修改计数也不发通知
/// 2. 生效：点赞数原子 + 1，然后异步推送通知
pub struct VoteDocHandler {
    doc_repo: Arc<dyn DocRepositoryPort>,
    vote_guard: Arc<dyn VoteGuardPort>,
    notifier: Arc<dyn NotifierPort>,
    window: Duration,
}

impl VoteDocHandler {
    pub fn new(
        doc_repo: Arc<dyn DocRepositoryPort>,
        vote_guard: Arc<dyn VoteGuardPort>,
        notifier: Arc<dyn NotifierPort>,
        window: Duration,
    ) -> Self {
        Self {
            doc_repo,
            vote_guard,
            notifier,
            window,
        }
    }

    pub async fn handle(&self, command: VoteDoc) -> Result<(), ApplicationError> {
        let key = vote_dedup_key(command.doc_id, &command.voter_addr);

        if !self.vote_guard.try_acquire(&key, self.window).await? {
            return Err(ApplicationError::business(BusinessErrorCode::VoteRepeated));
        }

        let affected = self.doc_repo.increase_vote_count(command.doc_id).await?;
        if affected == 0 {
            return Err(ApplicationError::not_found("Doc", command.doc_id));
        }

        tracing::info!(doc_id = command.doc_id, voter = %command.voter_addr, "Doc voted");

        match self.doc_repo.find_by_id(command.doc_id).await? {
            Some(doc) => self.notifier.publish(VOTE_TOPIC, vote_message(&doc.name)),
            None => tracing::warn!(
                doc_id = command.doc_id,
                "Doc removed before vote notification was sent"
            ),
        }

        Ok(())
    }
}

// ============================================================================
// RefreshEbookCounters
// ============================================================================

/// RefreshEbookCounters Handler - 汇总文档统计到电子书
pub struct RefreshEbookCountersHandler {
    doc_repo: Arc<dyn DocRepositoryPort>,
}

impl RefreshEbookCountersHandler {
    pub fn new(doc_repo: Arc<dyn DocRepositoryPort>) -> Self {
        Self { doc_repo }
    }

    /// 返回被刷新的电子书数量
    pub async fn handle(&self, _command: RefreshEbookCounters) -> Result<u64, ApplicationError> {
        let affected = self.doc_repo.refresh_ebook_counters().await?;

        tracing::debug!(ebooks = affected, "Ebook counters refreshed");

        Ok(affected)
    }
}
