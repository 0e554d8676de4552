//! 导出到文件
//!
//! 组装 → 序列化 → 先写临时文件再改名。任何一步失败都只返回一个错误，
//! 不会留下看起来完整的半成品文件。

use chrono::{DateTime, Local};
use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::adapter::docx::render_payload;
use super::adapter::DocxAdapterError;
use super::assembler::DocumentAssembler;
use super::block::DocumentPayload;
use super::style_table::StyleTable;
use crate::models::{Character, Scene};
use crate::utils::{slugify, ExportConstants};

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export failed: could not prepare output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("export failed: {0}")]
    Render(#[from] DocxAdapterError),

    #[error("export failed: could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("export failed: invalid input: {0}")]
    InvalidInput(String),
}

/// 导出结果
pub type ExportResult<T> = Result<T, ExportError>;

/// 一次成功导出的产物
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// 最终文件路径
    pub path: PathBuf,
    /// 文件名（用于下载）
    pub filename: String,
    /// 写入的块，便于调用方检查内容
    pub payload: DocumentPayload,
    pub size: usize,
}

/// 剧本导出器
#[derive(Debug, Clone)]
pub struct ScreenplayExporter {
    assembler: DocumentAssembler,
    output_dir: PathBuf,
}

impl ScreenplayExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            assembler: DocumentAssembler::default(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_styles(output_dir: impl Into<PathBuf>, styles: StyleTable) -> Self {
        Self {
            assembler: DocumentAssembler::new(styles),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn assembler(&self) -> &DocumentAssembler {
        &self.assembler
    }

    /// 导出完整剧本，文件名 `<标题>_<时间戳>.docx`
    pub fn export(
        &self,
        title: &str,
        author: &str,
        scenes: &[Scene],
        characters: &[Character],
    ) -> ExportResult<ExportOutcome> {
        let payload = self.assembler.build(title, author, scenes, characters);
        let stem = slugify(&payload.title);
        self.write_payload(payload, &stem, Local::now())
    }

    /// 导出单个场景，文件名 `Scene_<编号>_<时间戳>.docx`
    pub fn export_single_scene(&self, scene: &Scene, title: &str) -> ExportResult<ExportOutcome> {
        let payload = self.assembler.build_single_scene(scene, title);
        let number = scene
            .scene_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| ExportConstants::UNKNOWN_NUMBER.to_string());
        let stem = slugify(&format!("Scene_{}", number));
        self.write_payload(payload, &stem, Local::now())
    }

    /// 序列化并写入 `<stem>_<时间戳>.docx`
    pub fn write_payload(
        &self,
        payload: DocumentPayload,
        stem: &str,
        now: DateTime<Local>,
    ) -> ExportResult<ExportOutcome> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let bytes = render_payload(&payload, self.assembler.styles())?;

        let timestamp = now.format(ExportConstants::TIMESTAMP_FORMAT).to_string();
        let path = self.unique_path(stem, &timestamp);
        write_atomically(&path, &bytes)?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("【export】已写入 {} ({} 字节)", path.display(), bytes.len());

        Ok(ExportOutcome {
            path,
            filename,
            payload,
            size: bytes.len(),
        })
    }

    /// 同一秒内重名时追加 `_2`、`_3`……
    fn unique_path(&self, stem: &str, timestamp: &str) -> PathBuf {
        let base = format!("{}_{}", stem, timestamp);
        let mut candidate = self
            .output_dir
            .join(format!("{}.{}", base, ExportConstants::DOCX_EXTENSION));
        let mut suffix = 2;
        while candidate.exists() {
            candidate = self.output_dir.join(format!(
                "{}_{}.{}",
                base,
                suffix,
                ExportConstants::DOCX_EXTENSION
            ));
            suffix += 1;
        }
        candidate
    }
}

/// 以默认样式导出完整剧本到 `output_dir`
pub fn export_screenplay(
    output_dir: impl Into<PathBuf>,
    title: &str,
    author: &str,
    scenes: &[Scene],
    characters: &[Character],
) -> ExportResult<ExportOutcome> {
    ScreenplayExporter::new(output_dir).export(title, author, scenes, characters)
}

/// 以默认样式导出单个场景到 `output_dir`
pub fn export_single_scene(
    output_dir: impl Into<PathBuf>,
    scene: &Scene,
    title: &str,
) -> ExportResult<ExportOutcome> {
    ScreenplayExporter::new(output_dir).export_single_scene(scene, title)
}

/// 写到同目录下的 `.part` 临时文件，成功后改名
fn write_atomically(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.part", file_name));

    let result = fs::File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp_path, path));

    if let Err(source) = result {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(&temp_path) {
                warn!("【export】无法删除临时文件 {}: {}", temp_path.display(), e);
            }
        }
        return Err(ExportError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
