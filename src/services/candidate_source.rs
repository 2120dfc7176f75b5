//! 候选照片源 - 业务能力层
//!
//! 只负责"给我一页候选照片"和"翻到下一页"，不做任何筛选

use async_trait::async_trait;
use tracing::{debug, info};

use crate::clients::PexelsClient;
use crate::error::AppResult;
use crate::models::Candidate;

/// 分页候选源
#[async_trait]
pub trait CandidateSource: Send {
    /// 开始一次搜索，加载指定页
    async fn search(&mut self, term: &str, page: u32, page_size: u32) -> AppResult<()>;

    /// 翻到下一页
    ///
    /// 没有更多页时返回 `false`，当前页保持不变
    async fn next_page(&mut self) -> AppResult<bool>;

    /// 当前页码
    fn current_page(&self) -> u32;

    /// 当前页的候选照片
    fn current_page_candidates(&self) -> &[Candidate];
}

/// 基于 Pexels 搜索接口的候选源
pub struct PexelsSource {
    client: PexelsClient,
    term: String,
    page: u32,
    page_size: u32,
    has_next: bool,
    candidates: Vec<Candidate>,
}

impl PexelsSource {
    pub fn new(client: PexelsClient) -> Self {
        Self {
            client,
            term: String::new(),
            page: 0,
            page_size: 0,
            has_next: false,
            candidates: Vec::new(),
        }
    }

    async fn load(&mut self, page: u32) -> AppResult<()> {
        let result = self
            .client
            .search_photos(&self.term, page, self.page_size)
            .await?;

        self.page = page;
        self.has_next = result.next_page.is_some() && !result.photos.is_empty();
        self.candidates = result.photos.into_iter().map(Candidate::from).collect();

        debug!(
            "已加载第 {} 页: {} 张照片, 还有下一页: {}",
            self.page,
            self.candidates.len(),
            self.has_next
        );
        Ok(())
    }
}

#[async_trait]
impl CandidateSource for PexelsSource {
    async fn search(&mut self, term: &str, page: u32, page_size: u32) -> AppResult<()> {
        self.term = term.to_string();
        self.page_size = page_size;
        self.load(page.max(1)).await
    }

    async fn next_page(&mut self) -> AppResult<bool> {
        if !self.has_next {
            info!("📭 \"{}\" 没有更多搜索结果", self.term);
            return Ok(false);
        }
        self.load(self.page + 1).await?;
        Ok(true)
    }

    fn current_page(&self) -> u32 {
        self.page
    }

    fn current_page_candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn photo(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "url": format!("https://www.pexels.com/photo/green-hill-{}/", id),
            "photographer": "Ana",
            "src": {
                "original": format!("https://images.pexels.com/{}.jpeg", id),
                "large": format!("https://images.pexels.com/{}-l.jpeg", id),
                "large2x": format!("https://images.pexels.com/{}-l2x.jpeg", id)
            }
        })
    }

    async fn source(server: &MockServer) -> PexelsSource {
        let config = Config {
            pexels_api_base_url: server.uri(),
            pexels_api_key: "k".into(),
            ..Config::default()
        };
        PexelsSource::new(PexelsClient::new(&config, reqwest::Client::new()))
    }

    #[tokio::test]
    async fn next_page_advances_until_last_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1, "photos": [photo(1), photo(2)], "next_page": "p2"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2, "photos": [photo(3)]
            })))
            .mount(&server)
            .await;

        let mut source = source(&server).await;
        source.search("hill", 1, 2).await.unwrap();
        assert_eq!(source.current_page_candidates().len(), 2);
        assert_eq!(source.current_page_candidates()[0].description, "green hill");

        assert!(source.next_page().await.unwrap());
        assert_eq!(source.current_page(), 2);
        assert_eq!(source.current_page_candidates()[0].id, "3");

        assert!(!source.next_page().await.unwrap());
        assert_eq!(source.current_page(), 2);
    }
}
