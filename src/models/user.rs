use serde::{Deserialize, Serialize};

use super::lenient;

/// users.json 中的一条用户记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    /// 密码的 SHA-256 十六进制摘要（无盐，单轮）
    #[serde(deserialize_with = "lenient::text")]
    pub password: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub last_login: Option<String>,
}

/// 聊天记录中的一条消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}
