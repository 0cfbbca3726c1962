//! Worker Layer - Background Task Processing
//!
//! 实现 FooterWorker，定时刷新电子书统计

mod footer_worker;

pub use footer_worker::{FooterWorker, FooterWorkerConfig};
