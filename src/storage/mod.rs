//! 本地存储
//!
//! 用户、剧本和聊天记录都以整文件 JSON 保存，每次修改后整体重写（后写覆盖先写）。

pub mod chat;
pub mod json_file;
pub mod query;
pub mod sample;
pub mod user_store;
pub mod workspace;

use std::path::PathBuf;
use thiserror::Error;

pub use chat::ChatStore;
pub use query::ScriptStatistics;
pub use user_store::UserStore;
pub use workspace::ScriptWorkspace;

/// 存储错误
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// 存储结果
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        StorageError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
