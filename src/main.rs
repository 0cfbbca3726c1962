//! Wiki - 电子书 / 文档知识库后端

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use wiki::application::RefreshEbookCountersHandler;
use wiki::config::{load_config, print_config, LogConfig};
use wiki::infrastructure::cache::build_vote_guard;
use wiki::infrastructure::events::EventPublisher;
use wiki::infrastructure::http::{AppState, HttpServer, ServerConfig};
use wiki::infrastructure::id::SnowflakeIdGenerator;
use wiki::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteDocRepository, SqliteEbookRepository,
    SqliteUserRepository,
};
use wiki::infrastructure::worker::{FooterWorker, FooterWorkerConfig};

/// 初始化日志，`RUST_LOG` 优先于配置文件
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},wiki={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Wiki - 电子书知识库");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let ebook_repo = Arc::new(SqliteEbookRepository::new(pool.clone()));
    let doc_repo = Arc::new(SqliteDocRepository::new(pool.clone()));
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));

    // 点赞去重（Redis 或内存）
    let vote_guard = build_vote_guard(&config.cache)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize vote guard: {}", e))?;

    let id_generator = Arc::new(SnowflakeIdGenerator::new(
        config.id.datacenter_id,
        config.id.worker_id,
    ));
    let event_publisher = Arc::new(EventPublisher::new());

    let state = AppState::new(
        ebook_repo,
        doc_repo.clone(),
        user_repo,
        vote_guard,
        id_generator,
        event_publisher,
        Duration::from_secs(config.vote.window_secs),
    )
    .with_trust_proxy_headers(config.server.trust_proxy_headers);

    // 启动统计刷新 Worker
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker_handle = if config.footer.enabled {
        let worker = FooterWorker::new(
            FooterWorkerConfig {
                interval: Duration::from_secs(config.footer.interval_secs),
            },
            Arc::new(RefreshEbookCountersHandler::new(doc_repo)),
            shutdown_rx,
        );
        Some(tokio::spawn(worker.run()))
    } else {
        None
    };

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 停止 Worker
    let _ = shutdown_tx.send(true);
    if let Some(handle) = worker_handle {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "FooterWorker did not stop cleanly");
        }
    }

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
