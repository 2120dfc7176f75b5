//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、初始化日志文件
//! 2. **资源组装**：HTTP 客户端、SQLite 数据库、候选源、图片分析、发布服务
//! 3. **单次运行**：委托 `RunDriver` 完成一次"选图 → 发布 → 记录"
//! 4. **结果输出**：把本次结果追加到输出日志文件

use anyhow::{Context, Result};
use tracing::info;

use crate::clients::{build_http_client, FacebookClient, PexelsClient};
use crate::config::Config;
use crate::infrastructure::SqliteStore;
use crate::orchestrator::run_driver::{resolve_search_terms, RunDriver, RunReport};
use crate::services::{FacebookPublisher, HttpImageAnalysis, PexelsSource};
use crate::utils::logging::{append_log_line, init_log_file};
use crate::workflow::SelectionPipeline;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置不完整")?;
        init_log_file(&config.output_log_file)?;
        Ok(Self { config })
    }

    /// 运行一次
    pub async fn run(&self) -> Result<RunReport> {
        let config = &self.config;
        let http = build_http_client(config)?;

        let mut store = SqliteStore::open(&config.database_path)
            .with_context(|| format!("无法打开数据库: {}", config.database_path))?;
        let search_terms = resolve_search_terms(&config.search_terms, &store)?;
        info!("📋 共有 {} 个候选关键词", search_terms.len());

        let analysis = HttpImageAnalysis::new(http.clone(), &config.tesseract_bin);
        let publisher = FacebookPublisher::new(FacebookClient::new(config, http.clone()));
        let mut source = PexelsSource::new(PexelsClient::new(config, http));

        let pipeline =
            SelectionPipeline::prepare(&mut store, &analysis, &publisher, &config.download_path)?;
        let mut driver = RunDriver::new(&mut source, pipeline, search_terms, config.results_per_page);

        let report = driver.run().await?;
        self.write_summary(&report)?;
        Ok(report)
    }

    fn write_summary(&self, report: &RunReport) -> Result<()> {
        let line = match report {
            RunReport::Posted(record) => format!(
                "[{}] 已发布 #{} ({}) {}",
                record.timestamp, record.photo_id, record.description, record.url
            ),
            RunReport::Failsafe => format!(
                "[{}] 发布失败次数达到上限，未发布",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
            RunReport::SourceExhausted => format!(
                "[{}] 搜索结果已用完，未发布",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
        };
        append_log_line(&self.config.output_log_file, &line)?;
        info!("\n日志已保存至: {}", self.config.output_log_file);
        Ok(())
    }
}
