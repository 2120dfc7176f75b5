//! 内存存储
//!
//! 用于测试和试运行，进程退出后数据丢失。

use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::infrastructure::store::{PostStore, StoreField};
use crate::models::PostRecord;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<StoreField, Vec<String>>,
    records: Vec<PostRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置某个字段的值
    pub fn with_values<I, S>(mut self, field: StoreField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .entry(field)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// 已写入的发布记录
    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }
}

impl PostStore for MemoryStore {
    fn values_of(&self, field: StoreField) -> AppResult<Vec<String>> {
        Ok(self.values.get(&field).cloned().unwrap_or_default())
    }

    fn append(&mut self, record: &PostRecord) -> AppResult<()> {
        if self.contains(StoreField::PostId, &record.photo_id)? {
            return Err(AppError::duplicate("ID", &record.photo_id));
        }
        if self.contains(StoreField::ImageHash, &record.image_hash)? {
            return Err(AppError::duplicate("Image_Hash", &record.image_hash));
        }

        self.values
            .entry(StoreField::PostId)
            .or_default()
            .push(record.photo_id.clone());
        self.values
            .entry(StoreField::ImageHash)
            .or_default()
            .push(record.image_hash.clone());
        self.records.push(record.clone());
        Ok(())
    }
}
