/// Pexels API 客户端
///
/// 封装照片搜索接口
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::PexelsSearchPage;
use tracing::debug;

/// Pexels API 客户端
pub struct PexelsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PexelsClient {
    /// 创建新的 Pexels 客户端
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.pexels_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.pexels_api_key.clone(),
        }
    }

    /// 搜索照片
    ///
    /// # 参数
    /// - `query`: 搜索关键词
    /// - `page`: 页码（从1开始）
    /// - `per_page`: 每页数量
    ///
    /// # 返回
    /// 返回一页搜索结果
    pub async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> AppResult<PexelsSearchPage> {
        let endpoint = format!("{}/search", self.base_url);
        debug!("Pexels 搜索: query={} page={} per_page={}", query, page, per_page);

        let response = self
            .http
            .get(&endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .query(&[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        if !status.is_success() {
            return Err(AppError::api_bad_response(endpoint, status.as_u16(), body));
        }

        let search_page: PexelsSearchPage = serde_json::from_str(&body)?;
        debug!(
            "Pexels 返回 {} 张照片 (总数 {})",
            search_page.photos.len(),
            search_page.total_results
        );
        Ok(search_page)
    }
}
