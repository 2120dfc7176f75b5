use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
///
/// 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- Pexels 配置 ---
    pub pexels_api_key: String,
    pub pexels_api_base_url: String,
    /// 每页返回的照片数量
    pub results_per_page: u32,
    // --- Facebook 配置 ---
    pub facebook_page_id: String,
    pub facebook_access_token: String,
    pub facebook_graph_base_url: String,
    // --- 本地资源 ---
    /// SQLite 数据库文件
    pub database_path: String,
    /// 下载图片的本地路径（每次运行覆盖）
    pub download_path: String,
    /// tesseract 可执行文件
    pub tesseract_bin: String,
    /// HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    /// 搜索关键词；为空时从数据库读取
    pub search_terms: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pexels_api_key: String::new(),
            pexels_api_base_url: "https://api.pexels.com/v1".to_string(),
            results_per_page: 15,
            facebook_page_id: String::new(),
            facebook_access_token: String::new(),
            facebook_graph_base_url: "https://graph.facebook.com".to_string(),
            database_path: "Nature_Bot_Data.db".to_string(),
            download_path: "image.jpg".to_string(),
            tesseract_bin: "tesseract".to_string(),
            http_timeout_secs: 30,
            search_terms: Vec::new(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载（未设置的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，再用环境变量覆盖
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let config = Self::from_toml_str(&content).map_err(|source| {
            AppError::File(crate::error::FileError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })
        })?;
        Ok(config.with_env_overrides())
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        let default = self;
        Self {
            pexels_api_key: std::env::var("PEXELS_API_KEY").unwrap_or(default.pexels_api_key),
            pexels_api_base_url: std::env::var("PEXELS_API_BASE_URL").unwrap_or(default.pexels_api_base_url),
            results_per_page: std::env::var("RESULTS_PER_PAGE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.results_per_page),
            facebook_page_id: std::env::var("FACEBOOK_PAGE_ID").unwrap_or(default.facebook_page_id),
            facebook_access_token: std::env::var("FACEBOOK_ACCESS_TOKEN").unwrap_or(default.facebook_access_token),
            facebook_graph_base_url: std::env::var("FACEBOOK_GRAPH_BASE_URL").unwrap_or(default.facebook_graph_base_url),
            database_path: std::env::var("DATABASE_PATH").unwrap_or(default.database_path),
            download_path: std::env::var("DOWNLOAD_PATH").unwrap_or(default.download_path),
            tesseract_bin: std::env::var("TESSERACT_BIN").unwrap_or(default.tesseract_bin),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.http_timeout_secs),
            search_terms: std::env::var("SEARCH_TERMS")
                .ok()
                .map(|v| split_terms(&v))
                .unwrap_or(default.search_terms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 检查必填的 API 凭证
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (&self.pexels_api_key, "pexels_api_key", "PEXELS_API_KEY"),
            (&self.facebook_page_id, "facebook_page_id", "FACEBOOK_PAGE_ID"),
            (&self.facebook_access_token, "facebook_access_token", "FACEBOOK_ACCESS_TOKEN"),
        ];
        for (value, name, env_var) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue { name, env_var });
            }
        }
        Ok(())
    }
}

/// 逗号分隔的关键词列表
fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_values_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            pexels_api_key = "key"
            results_per_page = 30
            search_terms = ["forest", "ocean"]
            "#,
        )
        .unwrap();

        assert_eq!(config.pexels_api_key, "key");
        assert_eq!(config.results_per_page, 30);
        assert_eq!(config.search_terms, vec!["forest", "ocean"]);
        assert_eq!(config.database_path, "Nature_Bot_Data.db");
    }

    #[test]
    fn validate_reports_first_missing_credential() {
        let config = Config {
            pexels_api_key: "key".into(),
            ..Config::default()
        };
        match config.validate() {
            Err(ConfigError::MissingValue { env_var, .. }) => assert_eq!(env_var, "FACEBOOK_PAGE_ID"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn split_terms_skips_blanks() {
        assert_eq!(split_terms("lake, , mountain ,"), vec!["lake", "mountain"]);
    }
}
