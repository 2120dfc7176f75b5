use serde::{Deserialize, Serialize};

/// 候选照片
///
/// 由候选源按页产出，流程中只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// 照片ID（稳定且唯一）
    pub id: String,
    /// 描述文本
    pub description: String,
    /// 主下载地址（用于估算大小）
    pub primary_ref: String,
    /// 次下载地址（更高分辨率，下载并发布的版本）
    pub secondary_ref: String,
    /// 原图地址
    pub original_ref: String,
    /// 字节大小提示；为空时由图片分析服务查询
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_hint: Option<u64>,
    /// 文件扩展名 / 格式
    pub extension: String,
    /// 摄影师
    pub photographer: String,
    /// 公开页面地址
    pub url: String,
}

impl Candidate {
    /// 规范化描述：连字符替换为空格
    pub fn normalized_description(&self) -> String {
        self.description.replace('-', " ")
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[照片 #{} {}]", self.id, crate::utils::truncate_text(&self.description, 40))
    }
}
