//! # Nature Poster
//!
//! 从 Pexels 挑选一张自然照片发布到 Facebook 主页，并记录发布结果，
//! 保证同一张照片（或视觉上几乎相同的照片）不会被发布第二次。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有数据库连接，只暴露"查询 / 追加"能力
//! - `PostStore` - 存储接口；`SqliteStore` / `MemoryStore` 两种实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单张照片
//! - `CandidateSource` - 分页候选照片
//! - `ImageAnalysis` - 大小 / 下载 / 感知哈希 / OCR
//! - `PublishingService` - 发布与修改文案
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一页候选照片"的完整筛选流程
//! - `AttemptCounter` - 发布失败计数
//! - `SelectionPipeline` - 筛选 → 发布 → 记录
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/run_driver` - 翻页循环
//! - `orchestrator/app` - 组装资源并运行一次
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{MemoryStore, PostStore, SqliteStore, StoreField};
pub use models::{Candidate, PostRecord};
pub use orchestrator::{App, RunDriver, RunReport};
pub use workflow::{AttemptCounter, Outcome, SelectionPipeline};
