//! SQLite 存储
//!
//! 沿用原有数据库文件的表结构，缺失的表会自动创建。

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::infrastructure::store::{PostStore, StoreField};
use crate::models::PostRecord;

const POSTS_TABLE: &str = "Nature_Bot_Logged_FB_Posts";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Bad_Words (
    Bad_Words TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS Photo_Search_Terms (
    Terms TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS Nature_Bot_Logged_FB_Posts (
    Date_Time    TEXT NOT NULL,
    FB_Response  TEXT NOT NULL,
    Description  TEXT NOT NULL,
    Photographer TEXT NOT NULL,
    ID           TEXT NOT NULL UNIQUE,
    URL          TEXT NOT NULL,
    Image_URL    TEXT NOT NULL,
    Original_URL TEXT NOT NULL,
    File_Size    INTEGER NOT NULL,
    Image_Hash   TEXT NOT NULL UNIQUE
);
"#;

/// SQLite 存储
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// 打开（或创建）数据库文件
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        debug!("打开数据库: {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// 内存数据库
    pub fn open_in_memory() -> AppResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// 添加禁用词
    pub fn add_denylist_word(&self, word: &str) -> AppResult<()> {
        self.conn
            .execute("INSERT INTO Bad_Words (Bad_Words) VALUES (?1)", params![word])?;
        Ok(())
    }

    /// 添加搜索关键词
    pub fn add_search_term(&self, term: &str) -> AppResult<()> {
        self.conn
            .execute("INSERT INTO Photo_Search_Terms (Terms) VALUES (?1)", params![term])?;
        Ok(())
    }

    /// 已发布记录总数
    pub fn post_count(&self) -> AppResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", POSTS_TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

/// 旧库中 ID / File_Size 可能以数字存储，统一转成字符串
fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}

fn exists(conn: &Connection, field: StoreField, value: &str) -> AppResult<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE CAST({} AS TEXT) = ?1)",
        field.table(),
        field.column()
    );
    let exists: bool = conn.query_row(&sql, params![value], |row| row.get(0))?;
    Ok(exists)
}

impl PostStore for SqliteStore {
    fn values_of(&self, field: StoreField) -> AppResult<Vec<String>> {
        // 表名和列名来自 StoreField 常量，不含用户输入
        let sql = format!("SELECT {} FROM {}", field.column(), field.table());
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, Value>(0))?;

        let mut values = Vec::new();
        for row in rows {
            if let Some(value) = value_to_string(row?) {
                values.push(value);
            }
        }
        Ok(values)
    }

    fn contains(&self, field: StoreField, value: &str) -> AppResult<bool> {
        exists(&self.conn, field, value)
    }

    fn append(&mut self, record: &PostRecord) -> AppResult<()> {
        let tx = self.conn.transaction()?;

        // 旧库可能没有 UNIQUE 约束，在同一事务里再检查一次
        if exists(&tx, StoreField::PostId, &record.photo_id)? {
            return Err(AppError::duplicate("ID", &record.photo_id));
        }
        if exists(&tx, StoreField::ImageHash, &record.image_hash)? {
            return Err(AppError::duplicate("Image_Hash", &record.image_hash));
        }

        tx.execute(
            &format!(
                "INSERT INTO {} (Date_Time, FB_Response, Description, Photographer, ID, URL, \
                 Image_URL, Original_URL, File_Size, Image_Hash) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                POSTS_TABLE
            ),
            params![
                record.timestamp,
                record.response,
                record.description,
                record.photographer,
                record.photo_id,
                record.url,
                record.image_ref,
                record.original_ref,
                record.file_size as i64,
                record.image_hash,
            ],
        )?;
        tx.commit()?;

        debug!("已写入记录: 照片 #{}", record.photo_id);
        Ok(())
    }
}
