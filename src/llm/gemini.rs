//! Gemini REST 客户端（generateContent）

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerationOptions, LlmError, LlmResult, TextGenerator};
use crate::models::conf::LlmConf;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentRequest {
    fn new(prompt: &str, options: GenerationOptions) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        }
    }
}

impl GenerateContentResponse {
    /// 取第一个候选的全部文本片段
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini 客户端
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    conf: LlmConf,
}

impl GeminiClient {
    pub fn new(conf: LlmConf) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        GeminiClient { client, conf }
    }

    pub fn conf(&self) -> &LlmConf {
        &self.conf
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.conf.base_url.trim_end_matches('/'),
            self.conf.model_name
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> LlmResult<String> {
        if self.conf.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let body = GenerateContentRequest::new(prompt, options);
        debug!(
            "【gemini】请求 {} (prompt {} 字符, max {} tokens)",
            self.conf.model_name,
            prompt.len(),
            options.max_output_tokens
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.conf.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("【gemini】请求失败: {} {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.text().ok_or(LlmError::EmptyResponse)
    }
}
