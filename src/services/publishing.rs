//! 发布服务 - 业务能力层
//!
//! 只负责"发布一张照片"和"修改文案"，不关心发布前的筛选

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::FacebookClient;
use crate::error::AppResult;
use crate::models::Candidate;

/// 发布接口的响应
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResponse {
    /// 响应原文（写入发布记录）
    pub raw: String,
    /// 解析后的 JSON；不是合法 JSON 时为 `Null`
    pub body: Value,
}

impl PublishResponse {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let body = serde_json::from_str(&raw).unwrap_or(Value::Null);
        Self { raw, body }
    }

    /// 新帖子的ID；没有则说明本次发布失败
    pub fn post_id(&self) -> Option<String> {
        FacebookClient::extract_post_id(&self.body)
    }
}

/// 发布服务
#[async_trait]
pub trait PublishingService: Send + Sync {
    /// 发布照片
    async fn publish(&self, candidate: &Candidate) -> AppResult<PublishResponse>;

    /// 修改已发布帖子的文案
    async fn amend_caption(&self, post_id: &str, description: &str, url: &str) -> AppResult<()>;
}

/// 帖子文案：首字母大写的描述 + 照片页面地址
pub fn build_caption(description: &str, url: &str) -> String {
    let description = description.trim();
    let mut chars = description.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{}\n\n{}", capitalized, url)
}

/// 发布到 Facebook 主页
pub struct FacebookPublisher {
    client: FacebookClient,
}

impl FacebookPublisher {
    pub fn new(client: FacebookClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PublishingService for FacebookPublisher {
    async fn publish(&self, candidate: &Candidate) -> AppResult<PublishResponse> {
        let raw = self.client.post_photo(&candidate.secondary_ref).await?;
        Ok(PublishResponse::from_raw(raw))
    }

    async fn amend_caption(&self, post_id: &str, description: &str, url: &str) -> AppResult<()> {
        self.client
            .edit_caption(post_id, &build_caption(description, url))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_capitalizes_description() {
        assert_eq!(
            build_caption("blue lake view", "https://www.pexels.com/photo/blue-lake-view-1/"),
            "Blue lake view\n\nhttps://www.pexels.com/photo/blue-lake-view-1/"
        );
        assert_eq!(build_caption("", "u"), "\n\nu");
    }

    #[test]
    fn non_json_response_has_no_post_id() {
        let response = PublishResponse::from_raw("<html>502 Bad Gateway</html>");
        assert_eq!(response.body, Value::Null);
        assert_eq!(response.post_id(), None);
    }

    #[test]
    fn id_inside_error_message_is_not_taken_as_post_id() {
        let response = PublishResponse::from_raw(r#"{"error":{"message":"post 123 failed"}}"#);
        assert_eq!(response.post_id(), None);
    }

    #[test]
    fn graph_photo_response_yields_post_id() {
        let response = PublishResponse::from_raw(r#"{"id":"123","post_id":"99_123"}"#);
        assert_eq!(response.post_id().as_deref(), Some("99_123"));
    }
}
