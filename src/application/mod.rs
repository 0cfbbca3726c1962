//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、VoteGuard、Notifier、IdGenerator）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{
        DeleteDocsHandler, DeleteEbookHandler, DeleteUserHandler, ReadDocContentHandler,
        RefreshEbookCountersHandler, ResetPasswordHandler, SaveDocHandler, SaveEbookHandler,
        SaveUserHandler, VoteDocHandler,
    },
    DeleteDocs, DeleteEbook, DeleteUser, ReadDocContent, RefreshEbookCounters, ResetPassword,
    SaveDoc, SaveEbook, SaveUser, VoteDoc,
};

pub use error::{ApplicationError, BusinessErrorCode};

pub use ports::{
    ContentRecord, DocRecord, DocRepositoryPort, EbookFilter, EbookRecord, EbookRepositoryPort,
    GuardError, IdError, IdGeneratorPort, NotifierPort, RepositoryError, UserRecord,
    UserRepositoryPort, VoteGuardPort,
};

pub use queries::{
    handlers::{
        ListDocsByEbookHandler, ListDocsHandler, ListEbooksHandler, ListUsersHandler, LoginHandler,
        UserView,
    },
    ListDocs, ListDocsByEbook, ListEbooks, ListUsers, Login,
};
