use serde::{Deserialize, Serialize};

/// 发布成功后写入的持久记录
///
/// 字段顺序即数据库列顺序。`photo_id` 与 `image_hash`
/// 在所有记录中都必须唯一。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub timestamp: String,
    pub response: String,
    pub description: String,
    pub photographer: String,
    pub photo_id: String,
    pub url: String,
    /// 实际下载并发布的图片地址
    pub image_ref: String,
    pub original_ref: String,
    pub file_size: u64,
    pub image_hash: String,
}

impl PostRecord {
    /// 记录时间戳格式
    pub const TIMESTAMP_FORMAT: &'static str = "%m/%d/%Y %H:%M:%S";

    /// 当前本地时间的时间戳
    pub fn now_timestamp() -> String {
        chrono::Local::now().format(Self::TIMESTAMP_FORMAT).to_string()
    }
}
