//! 单次运行驱动 - 编排层
//!
//! ## 职责
//!
//! 1. **选择关键词**：从关键词列表中随机选一个
//! 2. **翻页循环**：当前页没有可发布的照片就请求下一页
//! 3. **结束条件**：发布成功、失败次数达到上限、候选源没有更多页
//!
//! 失败计数在整次运行内跨页共享。

use rand::seq::IndexedRandom;
use tracing::{info, warn};

use crate::error::{AppResult, ConfigError};
use crate::infrastructure::{PostStore, StoreField};
use crate::models::PostRecord;
use crate::services::CandidateSource;
use crate::utils::logging::{log_page_start, log_startup};
use crate::workflow::{AttemptCounter, Outcome, SelectionPipeline};

/// 一次运行的最终结果
#[derive(Debug, Clone, PartialEq)]
pub enum RunReport {
    /// 发布成功
    Posted(PostRecord),
    /// 发布失败次数达到上限
    Failsafe,
    /// 候选源已没有更多页
    SourceExhausted,
}

/// 单次运行驱动
pub struct RunDriver<'a> {
    source: &'a mut dyn CandidateSource,
    pipeline: SelectionPipeline<'a>,
    search_terms: Vec<String>,
    page_size: u32,
}

impl<'a> RunDriver<'a> {
    pub fn new(
        source: &'a mut dyn CandidateSource,
        pipeline: SelectionPipeline<'a>,
        search_terms: Vec<String>,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            pipeline,
            search_terms,
            page_size,
        }
    }

    /// 随机选择关键词并运行
    pub async fn run(&mut self) -> AppResult<RunReport> {
        let term = choose_search_term(&self.search_terms)?;
        self.run_with_term(&term).await
    }

    /// 使用指定关键词运行
    pub async fn run_with_term(&mut self, term: &str) -> AppResult<RunReport> {
        log_startup(term, self.page_size);

        self.source.search(term, 1, self.page_size).await?;
        let mut attempts = AttemptCounter::new();

        loop {
            let page = self.source.current_page_candidates();
            log_page_start(self.source.current_page(), page.len());

            let outcome = self.pipeline.evaluate(page, &mut attempts).await?;
            match outcome {
                Outcome::Posted(record) => {
                    info!("✅ 本次运行完成: 已发布照片 #{}", record.photo_id);
                    return Ok(RunReport::Posted(record));
                }
                Outcome::Failsafe => {
                    warn!("❌ 本次运行未能发布任何照片 (失败 {})", attempts);
                    return Ok(RunReport::Failsafe);
                }
                Outcome::ExhaustedPage => {
                    info!("📄 第 {} 页没有可发布的照片，翻页", self.source.current_page());
                    if !self.source.next_page().await? {
                        warn!("❌ 关键词 \"{}\" 的搜索结果已用完", term);
                        return Ok(RunReport::SourceExhausted);
                    }
                }
            }
        }
    }
}

/// 随机选择一个关键词
pub fn choose_search_term(terms: &[String]) -> AppResult<String> {
    terms
        .choose(&mut rand::rng())
        .cloned()
        .ok_or_else(|| ConfigError::NoSearchTerms.into())
}

/// 确定关键词列表：配置优先，为空时读取数据库
pub fn resolve_search_terms(configured: &[String], store: &dyn PostStore) -> AppResult<Vec<String>> {
    let terms: Vec<String> = if configured.is_empty() {
        store.values_of(StoreField::SearchTerm)?
    } else {
        configured.to_vec()
    };

    let terms: Vec<String> = terms
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        return Err(ConfigError::NoSearchTerms.into());
    }
    Ok(terms)
}
