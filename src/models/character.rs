use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;
use super::note::Note;

/// 角色记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    /// 年龄；旧数据里可能是数字也可能是字符串
    #[serde(
        deserialize_with = "age_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub personality: String,
    #[serde(deserialize_with = "lenient::text")]
    pub goals: String,
    #[serde(deserialize_with = "lenient::text")]
    pub conflicts: String,
    #[serde(deserialize_with = "lenient::notes", skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl Character {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn age(mut self, age: impl ToString) -> Self {
        self.age = Some(age.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn personality(mut self, personality: &str) -> Self {
        self.personality = personality.to_string();
        self
    }

    pub fn goals(mut self, goals: &str) -> Self {
        self.goals = goals.to_string();
        self
    }

    pub fn conflicts(mut self, conflicts: &str) -> Self {
        self.conflicts = conflicts.to_string();
        self
    }
}

fn age_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_accepts_number_and_string() {
        let a: Character = serde_json::from_str(r#"{"name":"Sam","age":30}"#).unwrap();
        let b: Character = serde_json::from_str(r#"{"name":"Sam","age":"thirty"}"#).unwrap();
        let c: Character = serde_json::from_str(r#"{"name":"Sam","age":""}"#).unwrap();
        assert_eq!(a.age.as_deref(), Some("30"));
        assert_eq!(b.age.as_deref(), Some("thirty"));
        assert_eq!(c.age, None);
    }

    #[test]
    fn notes_and_null_fields_are_tolerated() {
        let json = r#"{"name":"Sam","goals":null,"notes":[{"text":"limps","timestamp":"t"}]}"#;
        let sam: Character = serde_json::from_str(json).unwrap();
        assert_eq!(sam.goals, "");
        assert_eq!(sam.notes, vec![Note::stamped("limps", "t")]);
    }
}
