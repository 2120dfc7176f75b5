/// Facebook Graph API 客户端
///
/// 封装"发布照片"和"修改帖子文案"两个调用
use crate::config::Config;
use crate::error::{AppError, AppResult};
use serde_json::Value;
use tracing::{debug, warn};

/// Facebook Graph API 客户端
pub struct FacebookClient {
    http: reqwest::Client,
    base_url: String,
    page_id: String,
    access_token: String,
}

impl FacebookClient {
    /// 创建新的 Facebook 客户端
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.facebook_graph_base_url.trim_end_matches('/').to_string(),
            page_id: config.facebook_page_id.clone(),
            access_token: config.facebook_access_token.clone(),
        }
    }

    /// 以图片地址发布照片到主页
    ///
    /// 非 2xx 状态码不视为传输错误：响应体原样返回，
    /// 由调用方判断其中是否包含新帖子ID。
    ///
    /// # 返回
    /// 返回响应体原文
    pub async fn post_photo(&self, image_url: &str) -> AppResult<String> {
        let endpoint = format!("{}/{}/photos", self.base_url, self.page_id);
        debug!("发布照片: {}", image_url);

        let response = self
            .http
            .post(&endpoint)
            .form(&[("url", image_url), ("access_token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        if !status.is_success() {
            warn!("发布接口返回 {}: {}", status, crate::utils::truncate_text(&body, 200));
        }
        Ok(body)
    }

    /// 修改已发布帖子的文案
    pub async fn edit_caption(&self, post_id: &str, message: &str) -> AppResult<()> {
        let endpoint = format!("{}/{}", self.base_url, post_id);

        let response = self
            .http
            .post(&endpoint)
            .form(&[("message", message), ("access_token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api_bad_response(endpoint, status.as_u16(), body));
        }
        Ok(())
    }

    /// 从发布响应中提取新帖子ID
    ///
    /// 优先 `post_id`，其次 `id`；字符串或数字均可，空字符串视为缺失。
    pub fn extract_post_id(body: &Value) -> Option<String> {
        ["post_id", "id"].iter().find_map(|key| match body.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}
