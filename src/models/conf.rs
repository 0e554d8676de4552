use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 生成模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConf {
    /// Gemini API 密钥，为空时所有生成请求都会失败
    pub api_key: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// 对话模式下的回答长度上限
    pub chat_max_tokens: u32,
    pub base_url: String,
}

impl Default for LlmConf {
    fn default() -> Self {
        LlmConf {
            api_key: String::new(),
            model_name: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            chat_max_tokens: 150,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conf {
    /// 导出文件目录
    pub script_file_path: PathBuf,
    /// users.json / scripts.json / chat_history.json 所在目录
    pub data_dir: PathBuf,
    /// 标题为空时使用的默认标题
    pub default_title: String,
    /// 作者为空时使用的默认作者
    pub default_author: String,
    pub llm: LlmConf,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            script_file_path: PathBuf::from("./scripts/"),
            data_dir: PathBuf::from("data"),
            default_title: "Screenplay".to_string(),
            default_author: "Screenwriter".to_string(),
            llm: LlmConf::default(),
        }
    }
}

impl Conf {
    /// 从进程环境变量读取配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，未设置或无法解析的值回落到默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut conf = Conf::default();

        if let Some(key) = lookup("GEMINI_API_KEY") {
            conf.llm.api_key = key;
        }
        if let Some(model) = lookup("MODEL_NAME").filter(|m| !m.trim().is_empty()) {
            conf.llm.model_name = model;
        }
        if let Some(raw) = lookup("TEMPERATURE") {
            match raw.trim().parse::<f32>() {
                Ok(value) => conf.llm.temperature = value,
                Err(_) => warn!("【conf】TEMPERATURE 无法解析: {:?}，使用默认值", raw),
            }
        }
        if let Some(raw) = lookup("MAX_TOKENS") {
            match raw.trim().parse::<u32>() {
                Ok(value) => conf.llm.max_tokens = value,
                Err(_) => warn!("【conf】MAX_TOKENS 无法解析: {:?}，使用默认值", raw),
            }
        }
        if let Some(path) = lookup("SCRIPT_FILE_PATH").filter(|p| !p.trim().is_empty()) {
            conf.script_file_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("DATA_DIR").filter(|p| !p.trim().is_empty()) {
            conf.data_dir = PathBuf::from(path);
        }
        if let Some(title) = lookup("DEFAULT_TITLE").filter(|t| !t.trim().is_empty()) {
            conf.default_title = title;
        }
        if let Some(author) = lookup("DEFAULT_AUTHOR").filter(|a| !a.trim().is_empty()) {
            conf.default_author = author;
        }

        conf
    }

    /// 创建所需目录
    pub fn create_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.script_file_path)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_and_falls_back() {
        let mut env = HashMap::new();
        env.insert("MODEL_NAME", "gemini-pro");
        env.insert("TEMPERATURE", "hot");
        env.insert("MAX_TOKENS", "512");
        env.insert("DATA_DIR", "/tmp/desk");
        env.insert("DEFAULT_TITLE", "Untitled");
        env.insert("DEFAULT_AUTHOR", " ");

        let conf = Conf::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(conf.llm.model_name, "gemini-pro");
        assert_eq!(conf.llm.temperature, 0.7);
        assert_eq!(conf.llm.max_tokens, 512);
        assert_eq!(conf.data_dir, PathBuf::from("/tmp/desk"));
        assert_eq!(conf.script_file_path, PathBuf::from("./scripts/"));
        assert!(conf.llm.api_key.is_empty());
        assert_eq!(conf.default_title, "Untitled");
        assert_eq!(conf.default_author, "Screenwriter");
    }
}
