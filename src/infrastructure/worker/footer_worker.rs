//! Footer Worker - 定时汇总电子书统计
//!
//! 按固定间隔把文档的数量、阅读数、点赞数刷新到电子书

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::application::commands::handlers::RefreshEbookCountersHandler;
use crate::application::commands::RefreshEbookCounters;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct FooterWorkerConfig {
    /// 刷新间隔
    pub interval: Duration,
}

impl Default for FooterWorkerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
        }
    }
}

/// 电子书统计刷新 Worker
pub struct FooterWorker {
    config: FooterWorkerConfig,
    handler: Arc<RefreshEbookCountersHandler>,
    shutdown: watch::Receiver<bool>,
}

impl FooterWorker {
    pub fn new(
        config: FooterWorkerConfig,
        handler: Arc<RefreshEbookCountersHandler>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            handler,
            shutdown,
        }
    }

    /// 启动 Worker，收到关闭信号后退出
    pub async fn run(mut self) {
        tracing::info!(
            interval_ms = self.config.interval.as_millis() as u64,
            "FooterWorker started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        // 一次刷新耗时过长时不补跑
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // 失败只记录，下个周期重试
                    if let Err(e) = self.handler.handle(RefreshEbookCounters).await {
                        tracing::error!(error = %e, "Failed to refresh ebook counters");
                    }
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("FooterWorker stopped");
    }
}
