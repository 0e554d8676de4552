use serde::{Deserialize, Serialize};

/// 带时间戳的备注或节拍
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    /// 旧数据里的纯字符串备注没有时间戳
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Note {
    pub fn new(text: &str) -> Self {
        Note {
            text: text.to_string(),
            timestamp: None,
        }
    }

    pub fn stamped(text: &str, timestamp: &str) -> Self {
        Note {
            text: text.to_string(),
            timestamp: Some(timestamp.to_string()),
        }
    }
}

/// 按顺序把条目文本用换行拼起来；全部为空时返回 None
pub fn join_texts(notes: &[Note]) -> Option<String> {
    let lines: Vec<&str> = notes
        .iter()
        .map(|note| note.text.trim())
        .filter(|text| !text.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
