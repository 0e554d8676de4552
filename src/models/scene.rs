use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;
use super::note::{self, Note};

/// 场景记录
///
/// 存储层和导出器共用同一个结构；导出时所有字段都是可选的，
/// 缺失的字段由导出器替换成占位符或直接跳过。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// 场景编号，仅用于显示，不保证唯一
    #[serde(deserialize_with = "scene_number_from_any")]
    pub scene_number: Option<u32>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    /// 旧数据里的地点字段；部分记录同时带有 location 和 setting
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "String::is_empty")]
    pub setting: String,
    #[serde(deserialize_with = "lenient::text")]
    pub time_of_day: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub tone_mood: Vec<String>,
    /// 出场角色，按顺序与 dialogue 的行一一对应
    #[serde(deserialize_with = "lenient::string_list")]
    pub characters: Vec<String>,
    /// 动作描述，可能夹带对白
    #[serde(deserialize_with = "lenient::text")]
    pub action: String,
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dialogue: Option<String>,
    #[serde(deserialize_with = "lenient::notes", skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(deserialize_with = "lenient::notes")]
    pub beats: Vec<Note>,
    #[serde(deserialize_with = "lenient::text")]
    pub goal: String,
    #[serde(deserialize_with = "lenient::text")]
    pub conflict_stakes: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub links_to_scenes: Vec<String>,
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

impl Scene {
    pub fn new(scene_number: u32, title: &str, location: &str) -> Self {
        Self {
            scene_number: Some(scene_number),
            title: title.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    pub fn with_dialogue(mut self, characters: &[&str], dialogue: &str) -> Self {
        self.characters = characters.iter().map(|c| c.to_string()).collect();
        self.dialogue = Some(dialogue.to_string());
        self
    }

    /// 用一条不带时间戳的备注替换现有备注
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = vec![Note::new(notes)];
        self
    }

    /// 导出用的备注文本，多条备注按换行拼接
    pub fn notes_text(&self) -> Option<String> {
        note::join_texts(&self.notes)
    }

    /// 显示用地点：优先 location，空白时退回 setting
    pub fn place(&self) -> &str {
        if self.location.trim().is_empty() {
            &self.setting
        } else {
            &self.location
        }
    }

    /// 出场角色是否包含给定名字（大小写不敏感的子串匹配）
    pub fn features_character(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.characters
            .iter()
            .any(|c| c.to_lowercase().contains(&needle))
    }
}

/// 场景编号既可能是数字也可能是字符串
fn scene_number_from_any<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}
