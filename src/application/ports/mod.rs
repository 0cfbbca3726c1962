//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod id_generator;
mod notifier;
mod repositories;
mod vote_guard;

pub use id_generator::{IdError, IdGeneratorPort};
pub use notifier::NotifierPort;
pub use repositories::{
    ContentRecord, DocRecord, DocRepositoryPort, EbookFilter, EbookRecord, EbookRepositoryPort,
    RepositoryError, UserRecord, UserRepositoryPort,
};
pub use vote_guard::{GuardError, VoteGuardPort};
