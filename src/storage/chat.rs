//! 聊天记录（chat_history.json）

use log::debug;
use std::path::{Path, PathBuf};

use super::json_file;
use super::StorageResult;
use crate::models::{ChatMessage, Collection, Script};
use crate::utils::{now_iso, ExportConstants};

const CHAT_FILE: &str = "chat_history.json";
/// 上下文里保留的最近消息数
const RECENT_MESSAGES: usize = 5;
/// 每条历史消息在上下文里的最大字符数
const MESSAGE_PREVIEW_CHARS: usize = 100;

/// 聊天记录存储，键为 `<用户名>_<剧本 id>`（无剧本时为用户名）
#[derive(Debug)]
pub struct ChatStore {
    path: PathBuf,
    history: Collection<Vec<ChatMessage>>,
}

fn chat_key(username: &str, script_id: Option<&str>) -> String {
    match script_id {
        Some(id) if !id.is_empty() => format!("{}_{}", username, id),
        _ => username.to_string(),
    }
}

impl ChatStore {
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let path = dir.as_ref().join(CHAT_FILE);
        let history = json_file::load_or_default(&path)?;
        Ok(ChatStore { path, history })
    }

    pub fn add_message(
        &mut self,
        username: &str,
        script_id: Option<&str>,
        role: &str,
        content: &str,
    ) -> StorageResult<()> {
        let key = chat_key(username, script_id);
        let message = ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
            timestamp: now_iso(),
        };
        match self.history.get_mut(&key) {
            Some(messages) => messages.push(message),
            None => self.history.insert(key.clone(), vec![message]),
        }
        debug!("【chat】{} 新消息 ({})", key, role);
        json_file::save(&self.path, &self.history)
    }

    pub fn history(&self, username: &str, script_id: Option<&str>) -> &[ChatMessage] {
        self.history
            .get(&chat_key(username, script_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn clear(&mut self, username: &str, script_id: Option<&str>) -> StorageResult<()> {
        if let Some(messages) = self.history.get_mut(&chat_key(username, script_id)) {
            messages.clear();
            json_file::save(&self.path, &self.history)?;
        }
        Ok(())
    }

    /// 一行式的剧本概览
    pub fn context_summary(script: &Script) -> String {
        let mut parts = Vec::new();

        if !script.characters.is_empty() {
            let names: Vec<&str> = script
                .characters
                .values()
                .map(|c| name_or_unknown(&c.name))
                .collect();
            parts.push(format!("Characters: {}", names.join(", ")));
        }
        if !script.scenes.is_empty() {
            let titles: Vec<String> = script
                .scenes
                .values()
                .map(|s| {
                    format!(
                        "Scene {}: {}",
                        scene_number(s.scene_number),
                        or_default(&s.title, "No title")
                    )
                })
                .collect();
            parts.push(format!("Scenes: {}", titles.join(", ")));
        }
        if !script.locations.is_empty() {
            let names: Vec<&str> = script
                .locations
                .values()
                .map(|l| name_or_unknown(&l.name))
                .collect();
            parts.push(format!("Locations: {}", names.join(", ")));
        }

        if parts.is_empty() {
            "No content created yet.".to_string()
        } else {
            parts.join(" | ")
        }
    }

    /// 给生成模型的完整上下文：角色、场景、地点和最近的对话
    pub fn full_context(&self, script: &Script, username: &str) -> String {
        let mut parts = Vec::new();

        if !script.characters.is_empty() {
            let mut text = String::from("CHARACTERS:\n");
            for c in script.characters.values() {
                text.push_str(&format!(
                    "- {}: {}\n",
                    name_or_unknown(&c.name),
                    or_default(&c.description, ExportConstants::NO_DESCRIPTION)
                ));
            }
            parts.push(text);
        }

        if !script.scenes.is_empty() {
            let mut text = String::from("SCENES:\n");
            for s in script.scenes.values() {
                text.push_str(&format!(
                    "- Scene {}: {} at {}\n",
                    scene_number(s.scene_number),
                    or_default(&s.title, "No title"),
                    or_default(s.place(), "Unknown location")
                ));
            }
            parts.push(text);
        }

        if !script.locations.is_empty() {
            let mut text = String::from("LOCATIONS:\n");
            for l in script.locations.values() {
                text.push_str(&format!(
                    "- {}: {}\n",
                    name_or_unknown(&l.name),
                    or_default(&l.description, ExportConstants::NO_DESCRIPTION)
                ));
            }
            parts.push(text);
        }

        let history = self.history(username, Some(&script.id));
        if !history.is_empty() {
            let mut text = String::from("RECENT CHAT HISTORY:\n");
            let start = history.len().saturating_sub(RECENT_MESSAGES);
            for message in &history[start..] {
                let role = if message.is_user() { "User" } else { "Assistant" };
                let preview: String = message.content.chars().take(MESSAGE_PREVIEW_CHARS).collect();
                text.push_str(&format!("- {}: {}...\n", role, preview));
            }
            parts.push(text);
        }

        if parts.is_empty() {
            "No context available.".to_string()
        } else {
            parts.join("\n\n")
        }
    }
}

fn name_or_unknown(name: &str) -> &str {
    or_default(name, ExportConstants::UNKNOWN_NAME)
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn scene_number(number: Option<u32>) -> String {
    number
        .map(|n| n.to_string())
        .unwrap_or_else(|| ExportConstants::UNKNOWN_NUMBER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Character, Scene};

    fn script() -> Script {
        let mut script = Script::new("ana_1_0", "Draft", "", "now");
        script.characters.insert("1", Character::new("Sam").description("A cook"));
        script.scenes.insert("1", Scene::new(1, "Open", "Kitchen"));
        script
    }

    #[test]
    fn history_is_keyed_per_script_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut chat = ChatStore::open(dir.path()).unwrap();
            chat.add_message("ana", Some("s1"), "user", "hi").unwrap();
            chat.add_message("ana", None, "user", "global").unwrap();
        }
        let mut chat = ChatStore::open(dir.path()).unwrap();
        assert_eq!(chat.history("ana", Some("s1")).len(), 1);
        assert_eq!(chat.history("ana", None)[0].content, "global");

        chat.clear("ana", Some("s1")).unwrap();
        assert!(chat.history("ana", Some("s1")).is_empty());
    }

    #[test]
    fn summary_and_context_rendering() {
        let script = script();
        assert_eq!(
            ChatStore::context_summary(&script),
            "Characters: Sam | Scenes: Scene 1: Open"
        );
        assert_eq!(
            ChatStore::context_summary(&Script::default()),
            "No content created yet."
        );

        let dir = tempfile::tempdir().unwrap();
        let mut chat = ChatStore::open(dir.path()).unwrap();
        for i in 0..7 {
            chat.add_message("ana", Some("ana_1_0"), "user", &format!("m{}", i))
                .unwrap();
        }
        chat.add_message("ana", Some("ana_1_0"), "assistant", &"x".repeat(300))
            .unwrap();

        let context = chat.full_context(&script, "ana");
        assert!(context.starts_with("CHARACTERS:\n- Sam: A cook\n"));
        assert!(context.contains("- Scene 1: Open at Kitchen\n"));
        assert!(!context.contains("m2"));
        assert!(context.contains("- User: m3...\n"));
        assert!(context.contains(&format!("- Assistant: {}...\n", "x".repeat(100))));
    }
}
