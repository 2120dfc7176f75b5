pub mod facebook_client;
pub mod pexels_client;

pub use facebook_client::FacebookClient;
pub use pexels_client::PexelsClient;

use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 按配置构建共享的 HTTP 客户端
pub fn build_http_client(config: &Config) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(concat!("nature_poster/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::api_request_failed("client-builder", e))
}
