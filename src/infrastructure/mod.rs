//! 基础设施层
//!
//! 持有数据库连接等稀缺资源，只暴露"读 / 追加"能力

pub mod memory_store;
pub mod sqlite_store;
pub mod store;

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
pub use store::{PostStore, StoreField};
