//! 写作助手：把各个提示词模板接到生成后端上

use log::info;

use super::prompts;
use super::{GenerationOptions, LlmError, LlmResult, TextGenerator};
use crate::models::conf::LlmConf;
use crate::models::{Character, Scene};

/// 写作助手
pub struct ScreenwritingAssistant<G> {
    generator: G,
    options: GenerationOptions,
    chat_options: GenerationOptions,
}

fn require_text(text: &str, what: &str) -> LlmResult<()> {
    if text.trim().is_empty() {
        Err(LlmError::InvalidInput(format!("{} must not be empty", what)))
    } else {
        Ok(())
    }
}

impl<G: TextGenerator> ScreenwritingAssistant<G> {
    pub fn new(generator: G, conf: &LlmConf) -> Self {
        ScreenwritingAssistant {
            generator,
            options: GenerationOptions {
                temperature: conf.temperature,
                max_output_tokens: conf.max_tokens,
            },
            chat_options: GenerationOptions {
                temperature: conf.temperature,
                max_output_tokens: conf.chat_max_tokens,
            },
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 普通请求，自动加上角色设定
    pub async fn generate_response(&self, prompt: &str, context: &str) -> LlmResult<String> {
        let full_prompt = prompts::with_preamble(prompt, context);
        self.generator.generate(&full_prompt, self.options).await
    }

    /// 对话；回答长度受较小的 token 上限约束
    pub async fn chat_with_context(&self, user_message: &str, context: &str) -> LlmResult<String> {
        require_text(user_message, "message")?;
        info!("【assistant】对话请求 ({} 字符)", user_message.len());
        let prompt = prompts::chat_with_context(user_message, context);
        self.generator.generate(&prompt, self.chat_options).await
    }

    pub async fn analyze_character(&self, character: &Character) -> LlmResult<String> {
        self.generate_response(&prompts::analyze_character(character), "")
            .await
    }

    pub async fn analyze_scene(&self, scene: &Scene) -> LlmResult<String> {
        self.generate_response(&prompts::analyze_scene(scene), "").await
    }

    pub async fn modify_tone(&self, text: &str, tone: &str) -> LlmResult<String> {
        require_text(text, "scene text")?;
        self.generate_response(&prompts::modify_tone(text, tone), "")
            .await
    }

    pub async fn modify_setting(&self, scene_text: &str, setting: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::modify_setting(scene_text, setting), "")
            .await
    }

    /// 情绪为空时按 neutral 处理
    pub async fn generate_dialogue(
        &self,
        character_name: &str,
        context: &str,
        emotion: &str,
    ) -> LlmResult<String> {
        let emotion = if emotion.trim().is_empty() {
            "neutral"
        } else {
            emotion
        };
        self.generate_response(
            &prompts::generate_dialogue(character_name, context, emotion),
            "",
        )
        .await
    }

    pub async fn summarize_scene(&self, scene_text: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::summarize(scene_text), "")
            .await
    }

    pub async fn check_consistency(&self, scene_text: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::consistency_check(scene_text), "")
            .await
    }

    pub async fn suggest_next_action(&self, scene_text: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::next_action(scene_text), "")
            .await
    }

    /// 生成整场戏，结果可直接作为场景的 action
    pub async fn auto_generate_scene(&self, scene: &Scene) -> LlmResult<String> {
        self.generate_response(&prompts::auto_generate_scene(scene), "")
            .await
    }

    pub async fn process_scene(&self, scene_text: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::process_scene(scene_text), "")
            .await
    }

    pub async fn custom_request(&self, scene_text: &str, request: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        require_text(request, "request")?;
        self.generate_response(&prompts::custom_request(scene_text, request), "")
            .await
    }

    pub async fn expand_scene(&self, scene_text: &str, expansion_type: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::expand(scene_text, expansion_type), "")
            .await
    }

    pub async fn condense_scene(&self, scene_text: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::condense(scene_text), "")
            .await
    }

    pub async fn change_perspective(&self, scene_text: &str, perspective: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::change_perspective(scene_text, perspective), "")
            .await
    }

    pub async fn add_conflict(&self, scene_text: &str, conflict_type: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::add_conflict(scene_text, conflict_type), "")
            .await
    }

    pub async fn improve_dialogue(&self, dialogue: &str, character_name: &str) -> LlmResult<String> {
        require_text(dialogue, "dialogue")?;
        self.generate_response(&prompts::improve_dialogue(dialogue, character_name), "")
            .await
    }

    pub async fn add_visual_elements(&self, scene_text: &str) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::add_visual_elements(scene_text), "")
            .await
    }

    pub async fn create_transition(&self, scene1: &str, scene2: &str) -> LlmResult<String> {
        self.generate_response(&prompts::create_transition(scene1, scene2), "")
            .await
    }

    pub async fn fix_continuity(
        &self,
        scene_text: &str,
        previous_scenes: &[String],
    ) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(&prompts::fix_continuity(scene_text, previous_scenes), "")
            .await
    }

    pub async fn enhance_character_development(
        &self,
        scene_text: &str,
        character_name: &str,
    ) -> LlmResult<String> {
        require_text(scene_text, "scene text")?;
        self.generate_response(
            &prompts::enhance_character_development(scene_text, character_name),
            "",
        )
        .await
    }
}
