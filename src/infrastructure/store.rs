//! 持久化存储接口
//!
//! 与具体存储引擎解耦：SQLite、内存、文件都可以实现同一接口。

use crate::error::AppResult;
use crate::models::PostRecord;

/// 可查询的字段类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreField {
    /// 禁用词
    DenylistWord,
    /// 搜索关键词
    SearchTerm,
    /// 已发布记录的照片ID
    PostId,
    /// 已发布记录的感知哈希
    ImageHash,
}

impl StoreField {
    /// 对应的表名
    pub fn table(self) -> &'static str {
        match self {
            StoreField::DenylistWord => "Bad_Words",
            StoreField::SearchTerm => "Photo_Search_Terms",
            StoreField::PostId | StoreField::ImageHash => "Nature_Bot_Logged_FB_Posts",
        }
    }

    /// 对应的列名
    pub fn column(self) -> &'static str {
        match self {
            StoreField::DenylistWord => "Bad_Words",
            StoreField::SearchTerm => "Terms",
            StoreField::PostId => "ID",
            StoreField::ImageHash => "Image_Hash",
        }
    }
}

/// 持久化存储
///
/// 职责：
/// - 查询禁用词、搜索关键词、已发布的ID和哈希
/// - 以"全有或全无"的方式追加一条发布记录
/// - 追加时保证照片ID和哈希的唯一性
pub trait PostStore: Send {
    /// 读取某个字段的全部值
    fn values_of(&self, field: StoreField) -> AppResult<Vec<String>>;

    /// 判断某个值是否已存在
    fn contains(&self, field: StoreField, value: &str) -> AppResult<bool> {
        Ok(self.values_of(field)?.iter().any(|v| v == value))
    }

    /// 原子地追加一条发布记录
    ///
    /// 照片ID或哈希已存在时返回 `StoreError::Duplicate`，不写入任何内容。
    fn append(&mut self, record: &PostRecord) -> AppResult<()>;
}
