//! 对外 API
//!
//! 宿主应用调用的异步接口。导出本身是阻塞的文件操作，放到 `spawn_blocking` 上执行；
//! 每个接口都返回 `ExportResult`，失败原因写在 `message` 里。

use log::{error, info};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::docx::{
    export_screenplay, export_single_scene, payload_to_base64, DocumentAssembler, ExportError,
    ExportOutcome,
};
use crate::models::{Character, Collection, Conf, Scene, Script};
use crate::storage::{StorageError, UserStore};

/// 导出结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    pub success: bool,
    pub message: String,
    pub file_path: Option<String>,
    /// 下载用文件名
    pub filename: Option<String>,
    /// Base64 导出时的文档内容
    pub data: Option<String>,
}

impl ExportResult {
    fn written(outcome: &ExportOutcome) -> Self {
        ExportResult {
            success: true,
            message: format!("DOCX exported: {}", outcome.filename),
            file_path: Some(outcome.path.to_string_lossy().into_owned()),
            filename: Some(outcome.filename.clone()),
            data: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        error!("【api】{}", message);
        ExportResult {
            success: false,
            message,
            file_path: None,
            filename: None,
            data: None,
        }
    }
}

impl From<Result<ExportOutcome, ExportError>> for ExportResult {
    fn from(result: Result<ExportOutcome, ExportError>) -> Self {
        match result {
            Ok(outcome) => ExportResult::written(&outcome),
            Err(e) => ExportResult::failed(e.to_string()),
        }
    }
}

/// 记录列表：JSON 数组，或按插入顺序的 `id -> 记录` 对象
///
/// 按首字符决定形状，错误信息里保留 serde 给出的具体原因和位置。
fn parse_records<T: DeserializeOwned>(text: &str, what: &str) -> Result<Vec<T>, ExportError> {
    let trimmed = text.trim_start();
    let parsed = match trimmed.chars().next() {
        None => return Ok(Vec::new()),
        Some('[') => serde_json::from_str::<Vec<T>>(trimmed),
        Some('{') => serde_json::from_str::<Collection<T>>(trimmed).map(Collection::into_vec),
        Some(other) => {
            return Err(ExportError::InvalidInput(format!(
                "{}: expected a JSON array or object of records, found {:?}",
                what, other
            )))
        }
    };
    parsed.map_err(|e| ExportError::InvalidInput(format!("{}: {}", what, e)))
}

/// 解析场景 JSON；空串视为没有场景
pub fn parse_scenes_json(text: &str) -> Result<Vec<Scene>, ExportError> {
    parse_records(text, "scenes")
}

/// 解析角色 JSON
pub fn parse_characters_json(text: &str) -> Result<Vec<Character>, ExportError> {
    parse_records(text, "characters")
}

async fn run_blocking<F>(job: F) -> ExportResult
where
    F: FnOnce() -> Result<ExportOutcome, ExportError> + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(result) => result.into(),
        Err(e) => ExportResult::failed(format!("export failed: worker panicked: {}", e)),
    }
}

/// 导出完整剧本：场景按给定顺序，角色表作为附录
pub async fn export_to_docx(
    scenes: Vec<Scene>,
    characters: Vec<Character>,
    title: String,
    author: String,
    output_dir: PathBuf,
) -> ExportResult {
    run_blocking(move || export_screenplay(output_dir, &title, &author, &scenes, &characters))
        .await
}

/// 从 JSON 文本导出；任一输入解析失败则整体失败
pub async fn export_json_to_docx(
    scenes_json: String,
    characters_json: String,
    title: String,
    author: String,
    output_dir: PathBuf,
) -> ExportResult {
    let parsed = parse_scenes_json(&scenes_json)
        .and_then(|scenes| Ok((scenes, parse_characters_json(&characters_json)?)));
    match parsed {
        Ok((scenes, characters)) => {
            export_to_docx(scenes, characters, title, author, output_dir).await
        }
        Err(e) => ExportResult::failed(e.to_string()),
    }
}

/// 导出一个剧本记录，场景按插入顺序
pub async fn export_script_to_docx(script: Script, author: String, output_dir: PathBuf) -> ExportResult {
    let scenes = script.scenes.to_vec();
    let characters = script.characters.to_vec();
    export_to_docx(scenes, characters, script.name, author, output_dir).await
}

/// 导出单个场景
pub async fn export_scene_to_docx(scene: Scene, title: String, output_dir: PathBuf) -> ExportResult {
    run_blocking(move || export_single_scene(output_dir, &scene, &title)).await
}

/// 不落盘，返回 Base64 编码的文档
pub async fn export_to_docx_base64(
    scenes: Vec<Scene>,
    characters: Vec<Character>,
    title: String,
    author: String,
) -> ExportResult {
    let job = move || {
        let assembler = DocumentAssembler::default();
        let payload = assembler.build(&title, &author, &scenes, &characters);
        payload_to_base64(&payload, assembler.styles())
    };

    match tokio::task::spawn_blocking(job).await {
        Ok(Ok(data)) => ExportResult {
            success: true,
            message: "DOCX Base64 generated".to_string(),
            file_path: None,
            filename: None,
            data: Some(data),
        },
        Ok(Err(e)) => ExportResult::failed(e.to_string()),
        Err(e) => ExportResult::failed(format!("export failed: worker panicked: {}", e)),
    }
}

/// 按用户和剧本 id 读取存储并导出到配置的目录
///
/// 剧本名为空时使用 `conf.default_title`，作者取 `conf.default_author`。
pub async fn export_stored_script(conf: &Conf, username: &str, script_id: &str) -> ExportResult {
    let mut script = match load_script(conf, username, script_id) {
        Ok(script) => script,
        Err(e) => return ExportResult::failed(format!("export failed: {}", e)),
    };
    if script.name.trim().is_empty() {
        script.name = conf.default_title.clone();
    }
    info!("【api】导出 {} / {}", username, script.name);
    export_script_to_docx(script, conf.default_author.clone(), conf.script_file_path.clone()).await
}

fn load_script(conf: &Conf, username: &str, script_id: &str) -> Result<Script, StorageError> {
    let store = UserStore::open(&conf.data_dir)?;
    store
        .get_script(username, script_id)
        .cloned()
        .ok_or_else(|| StorageError::NotFound {
            kind: "script",
            id: script_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenes_json_accepts_list_and_ordered_object() {
        let list = parse_scenes_json(r#"[{"title":"A"},{"title":"B"}]"#).unwrap();
        assert_eq!(list[1].title, "B");

        let map = parse_scenes_json(r#"{"2":{"title":"Second"},"1":{"title":"First"}}"#).unwrap();
        let titles: Vec<&str> = map.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);

        assert!(parse_scenes_json("").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_invalid_input() {
        let err = parse_characters_json("[{").unwrap_err();
        assert!(matches!(err, ExportError::InvalidInput(_)));
        assert!(err.to_string().starts_with("export failed: invalid input: characters"));
    }

    #[test]
    fn parse_errors_carry_the_underlying_reason() {
        let err = parse_scenes_json(r#"[{"title":"A"}, 7]"#).unwrap_err().to_string();
        assert!(err.contains("invalid type: integer `7`"), "{}", err);
        assert!(err.contains("line 1"), "{}", err);
        assert!(!err.contains("untagged"), "{}", err);

        let err = parse_characters_json(r#"{"1": "Sam"}"#).unwrap_err().to_string();
        assert!(err.contains("invalid type: string \"Sam\""), "{}", err);

        let err = parse_scenes_json("scenes").unwrap_err().to_string();
        assert!(err.contains("expected a JSON array or object"), "{}", err);
    }
}
