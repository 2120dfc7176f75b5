use thiserror::Error;

/// 应用程序错误类型
///
/// 这些错误都属于"协作方故障"：筛选流程本身不会捕获它们，
/// 而是原样向上传递到一次运行的边界。
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误（Pexels / Facebook）
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 持久化存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 图片分析错误（下载 / 哈希 / OCR）
    #[error("图片分析错误: {0}")]
    Analysis(#[from] AnalysisError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误状态码
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

/// 持久化存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 数据库操作失败
    #[error("数据库操作失败: {0}")]
    Database(#[from] rusqlite::Error),
    /// 违反唯一性约束：同一张照片或同一哈希不允许记录两次
    #[error("重复记录 ({field}): {value}")]
    Duplicate { field: &'static str, value: String },
}

/// 图片分析错误
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 无法获取图片大小
    #[error("无法获取图片大小: {reference}")]
    SizeUnavailable { reference: String },
    /// 图片解码失败
    #[error("图片解码失败 ({path}): {source}")]
    DecodeFailed {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// OCR 执行失败
    #[error("OCR 执行失败 ({program}): {message}")]
    OcrFailed { program: String, message: String },
    /// 后台任务异常退出
    #[error("后台任务失败: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 其他 IO 错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必填配置项为空
    #[error("缺少必填配置项 {name} (环境变量 {env_var})")]
    MissingValue {
        name: &'static str,
        env_var: &'static str,
    },
    /// 没有可用的搜索关键词
    #[error("没有可用的搜索关键词")]
    NoSearchTerms,
}

// ========== 从常见错误类型转换 ==========

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Store(StoreError::Database(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::Io(err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Analysis(AnalysisError::TaskFailed(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建API错误响应
    pub fn api_bad_response(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        })
    }

    /// 创建重复记录错误
    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        AppError::Store(StoreError::Duplicate {
            field,
            value: value.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
