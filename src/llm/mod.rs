//! 文本生成
//!
//! `TextGenerator` 是生成后端的接口，`GeminiClient` 是唯一的真实实现；
//! `ScreenwritingAssistant` 在其上提供各个写作辅助功能。

pub mod assistant;
pub mod gemini;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;

pub use assistant::ScreenwritingAssistant;
pub use gemini::GeminiClient;

/// 生成错误
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("generation API returned no text")]
    EmptyResponse,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// 生成结果
pub type LlmResult<T> = Result<T, LlmError>;

/// 单次生成的参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            temperature: 0.7,
            max_output_tokens: 2000,
        }
    }
}

/// 文本生成后端
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> LlmResult<String>;
}
