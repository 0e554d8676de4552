//! 宽松字段读取
//!
//! 数据文件由多个版本的前端写入，同一字段可能是字符串、数字、数组或 null。
//! 这里把这些形状统一成记录里的类型，单个字段的形状不对不会让整份文件读取失败。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::note::Note;

/// 标量转成文本；null 和对象视为空
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 文本字段：数字和布尔值转成字符串，数组用 `, ` 拼接，其余为空串
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other).unwrap_or_default(),
    })
}

/// 可选文本字段；空白视为缺失
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = text(deserializer)?;
    Ok(if value.trim().is_empty() { None } else { Some(value) })
}

/// 字符串列表：数组，或逗号分隔的字符串
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s
            .split(',')
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => map.get("text").cloned().and_then(scalar_text),
                other => scalar_text(other),
            })
            .collect(),
        Value::Number(_) | Value::Bool(_) => scalar_text(value).into_iter().collect(),
        _ => Vec::new(),
    })
}

/// 带时间戳的条目列表：`[{text, timestamp}]`、字符串数组，或单个字符串
pub(crate) fn notes<'de, D>(deserializer: D) -> Result<Vec<Note>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(note_from_value).collect(),
        other => note_from_value(other).into_iter().collect(),
    })
}

fn note_from_value(value: Value) -> Option<Note> {
    let note = match value {
        Value::Object(mut map) => {
            let text = map.remove("text").and_then(scalar_text)?;
            let timestamp = map
                .remove("timestamp")
                .and_then(scalar_text)
                .filter(|t| !t.is_empty());
            Note { text, timestamp }
        }
        other => Note::new(&scalar_text(other)?),
    };
    if note.text.trim().is_empty() {
        None
    } else {
        Some(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "text")]
        name: String,
        #[serde(deserialize_with = "optional_text")]
        dialogue: Option<String>,
        #[serde(deserialize_with = "string_list")]
        objects: Vec<String>,
        #[serde(deserialize_with = "notes")]
        notes: Vec<Note>,
    }

    fn read(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn text_accepts_scalars_and_null() {
        assert_eq!(read(r#"{"name": null}"#).name, "");
        assert_eq!(read(r#"{"name": 42}"#).name, "42");
        assert_eq!(read(r#"{"name": ["a", "b"]}"#).name, "a, b");
        assert_eq!(read(r#"{"dialogue": "  "}"#).dialogue, None);
        assert_eq!(read(r#"{"dialogue": null}"#).dialogue, None);
    }

    #[test]
    fn string_list_accepts_every_shape() {
        assert_eq!(read(r#"{"objects": "desk, chair ,"}"#).objects, vec!["desk", "chair"]);
        assert_eq!(read(r#"{"objects": ["desk", 2, null]}"#).objects, vec!["desk", "2"]);
        assert_eq!(read(r#"{"objects": [{"text": "beat", "timestamp": "t"}]}"#).objects, vec!["beat"]);
        assert_eq!(read(r#"{"objects": 7}"#).objects, vec!["7"]);
        assert!(read(r#"{"objects": null}"#).objects.is_empty());
        assert!(read(r#"{"objects": {"a": 1}}"#).objects.is_empty());
    }

    #[test]
    fn notes_keep_timestamps() {
        let parsed = read(
            r#"{"notes": [{"text": "rain", "timestamp": "2024-01-01T10:00:00"}, "sirens", {"timestamp": "x"}, ""]}"#,
        );
        assert_eq!(
            parsed.notes,
            vec![
                Note {
                    text: "rain".to_string(),
                    timestamp: Some("2024-01-01T10:00:00".to_string()),
                },
                Note::new("sirens"),
            ]
        );
        assert_eq!(read(r#"{"notes": "one line"}"#).notes, vec![Note::new("one line")]);
        assert!(read(r#"{"notes": null}"#).notes.is_empty());
    }
}
