//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 按配置构建 HTTP 客户端、数据库、各项服务
//! - 运行一次 `RunDriver`，输出结果
//!
//! ### `run_driver` - 单次运行驱动
//! - 随机选择搜索关键词
//! - 逐页把候选照片交给 `SelectionPipeline`
//! - 发布成功、失败上限或没有更多页时结束
//!
//! ## 层次关系
//!
//! ```text
//! app (组装资源)
//!     ↓
//! run_driver (翻页循环)
//!     ↓
//! workflow::SelectionPipeline (筛选一页)
//!     ↓
//! services (能力层：候选源 / 图片分析 / 发布)
//!     ↓
//! infrastructure (基础设施：PostStore)
//! ```

pub mod app;
pub mod run_driver;

// 重新导出主要类型
pub use app::App;
pub use run_driver::{choose_search_term, resolve_search_terms, RunDriver, RunReport};
