//! 整文件 JSON 读写

use log::error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::{StorageError, StorageResult};

/// 读取 JSON 文件；文件不存在时返回默认值
///
/// 内容无法解析时返回 [`StorageError::Json`]，文件保持原样，
/// 调用方拿不到可以写回的空数据。
pub fn load_or_default<T>(path: &Path) -> StorageResult<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let text = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| {
        error!("【storage】{} 无法解析，拒绝载入: {}", path.display(), source);
        StorageError::Json {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// 严格读取：文件缺失或格式错误都报错
pub fn load<T: DeserializeOwned>(path: &Path) -> StorageResult<T> {
    let text = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// 以两空格缩进写出，必要时创建父目录
pub fn save<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let text = serde_json::to_string_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}
