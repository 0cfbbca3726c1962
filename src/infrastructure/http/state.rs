//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;
use std::time::Duration;

use crate::application::{
    // Command handlers
    DeleteDocsHandler, DeleteEbookHandler, DeleteUserHandler, ReadDocContentHandler,
    RefreshEbookCountersHandler, ResetPasswordHandler, SaveDocHandler, SaveEbookHandler,
    SaveUserHandler, VoteDocHandler,
    // Query handlers
    ListDocsByEbookHandler, ListDocsHandler, ListEbooksHandler, ListUsersHandler, LoginHandler,
    // Ports
    DocRepositoryPort, EbookRepositoryPort, IdGeneratorPort, UserRepositoryPort, VoteGuardPort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    pub event_publisher: Arc<EventPublisher>,

    /// 为 true 时点赞来源地址取代理头，否则只认 TCP 对端
    pub trust_proxy_headers: bool,

    // ========== Command Handlers ==========
    pub save_ebook_handler: SaveEbookHandler,
    pub delete_ebook_handler: DeleteEbookHandler,
    pub save_doc_handler: SaveDocHandler,
    pub delete_docs_handler: DeleteDocsHandler,
    pub read_doc_content_handler: ReadDocContentHandler,
    pub vote_doc_handler: VoteDocHandler,
    pub refresh_counters_handler: Arc<RefreshEbookCountersHandler>,
    pub save_user_handler: SaveUserHandler,
    pub delete_user_handler: DeleteUserHandler,
    pub reset_password_handler: ResetPasswordHandler,

    // ========== Query Handlers ==========
    pub list_ebooks_handler: ListEbooksHandler,
    pub list_docs_by_ebook_handler: ListDocsByEbookHandler,
    pub list_docs_handler: ListDocsHandler,
    pub list_users_handler: ListUsersHandler,
    pub login_handler: LoginHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `vote_window` 为同一来源对同一文档的点赞去重窗口
    pub fn new(
        ebook_repo: Arc<dyn EbookRepositoryPort>,
        doc_repo: Arc<dyn DocRepositoryPort>,
        user_repo: Arc<dyn UserRepositoryPort>,
        vote_guard: Arc<dyn VoteGuardPort>,
        id_generator: Arc<dyn IdGeneratorPort>,
        event_publisher: Arc<EventPublisher>,
        vote_window: Duration,
    ) -> Self {
        Self {
            event_publisher: event_publisher.clone(),
            trust_proxy_headers: false,

            // Command handlers
            save_ebook_handler: SaveEbookHandler::new(ebook_repo.clone(), id_generator.clone()),
            delete_ebook_handler: DeleteEbookHandler::new(ebook_repo.clone()),
            save_doc_handler: SaveDocHandler::new(doc_repo.clone(), id_generator.clone()),
            delete_docs_handler: DeleteDocsHandler::new(doc_repo.clone()),
            read_doc_content_handler: ReadDocContentHandler::new(doc_repo.clone()),
            vote_doc_handler: VoteDocHandler::new(
                doc_repo.clone(),
                vote_guard,
                event_publisher,
                vote_window,
            ),
            refresh_counters_handler: Arc::new(RefreshEbookCountersHandler::new(doc_repo.clone())),
            save_user_handler: SaveUserHandler::new(user_repo.clone(), id_generator),
            delete_user_handler: DeleteUserHandler::new(user_repo.clone()),
            reset_password_handler: ResetPasswordHandler::new(user_repo.clone()),

            // Query handlers
            list_ebooks_handler: ListEbooksHandler::new(ebook_repo),
            list_docs_by_ebook_handler: ListDocsByEbookHandler::new(doc_repo.clone()),
            list_docs_handler: ListDocsHandler::new(doc_repo),
            list_users_handler: ListUsersHandler::new(user_repo.clone()),
            login_handler: LoginHandler::new(user_repo),
        }
    }

    pub fn with_trust_proxy_headers(mut self, trust_proxy_headers: bool) -> Self {
        self.trust_proxy_headers = trust_proxy_headers;
        self
    }
}

/// 测试用：内存 SQLite + 内存 Vote Guard 组装的应用状态
#[cfg(test)]
pub(crate) async fn test_state() -> Arc<AppState> {
    Arc::new(test_app_state().await)
}

#[cfg(test)]
pub(crate) async fn test_app_state() -> AppState {
    use crate::infrastructure::cache::InMemoryVoteGuard;
    use crate::infrastructure::id::SnowflakeIdGenerator;
    use crate::infrastructure::persistence::sqlite::{
        test_pool, SqliteDocRepository, SqliteEbookRepository, SqliteUserRepository,
    };

    let pool = test_pool().await;
    AppState::new(
        Arc::new(SqliteEbookRepository::new(pool.clone())),
        Arc::new(SqliteDocRepository::new(pool.clone())),
        Arc::new(SqliteUserRepository::new(pool)),
        Arc::new(InMemoryVoteGuard::new()),
        Arc::new(SnowflakeIdGenerator::new(1, 1)),
        Arc::new(EventPublisher::new()),
        Duration::from_secs(5000),
    )
}
