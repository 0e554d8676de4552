use serde::{Deserialize, Serialize};

use super::lenient;
use super::note::Note;

/// 地点记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    /// 场景里可用的道具；旧数据里可能是逗号分隔的字符串
    #[serde(deserialize_with = "lenient::string_list")]
    pub objects: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub lighting: String,
    #[serde(deserialize_with = "lenient::text")]
    pub date_time: String,
    /// Indoor / Outdoor / Public / Private / Other
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub location_type: String,
    #[serde(deserialize_with = "lenient::notes", skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl Location {
    pub fn new(name: &str, description: &str) -> Self {
        Location {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    pub fn objects(mut self, objects: &[&str]) -> Self {
        self.objects = objects.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn lighting(mut self, lighting: &str) -> Self {
        self.lighting = lighting.to_string();
        self
    }

    pub fn date_time(mut self, date_time: &str) -> Self {
        self.date_time = date_time.to_string();
        self
    }

    pub fn location_type(mut self, location_type: &str) -> Self {
        self.location_type = location_type.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_may_be_a_comma_string() {
        let json = r#"{"name":"Roof","objects":"desk, chair","type":null}"#;
        let roof: Location = serde_json::from_str(json).unwrap();
        assert_eq!(roof.objects, vec!["desk", "chair"]);
        assert_eq!(roof.location_type, "");

        let saved = serde_json::to_value(&roof).unwrap();
        assert_eq!(saved["objects"], serde_json::json!(["desk", "chair"]));
        assert_eq!(saved["type"], "");
    }
}
