//! 提示词模板

use crate::models::{Character, Scene};
use crate::utils::ExportConstants;

/// 所有普通请求前面都加上的角色设定
pub const SYSTEM_PREAMBLE: &str = "You are an expert screenwriting assistant. Help filmmakers with script development, character development, scene writing, and story structure.";

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// 普通请求：角色设定 + 可选上下文 + 请求
pub fn with_preamble(prompt: &str, context: &str) -> String {
    if context.trim().is_empty() {
        format!("{}\n\n{}", SYSTEM_PREAMBLE, prompt)
    } else {
        format!("{}\n\n{}\n\n{}", SYSTEM_PREAMBLE, context, prompt)
    }
}

/// 带完整剧本上下文的对话
pub fn chat_with_context(user_message: &str, context: &str) -> String {
    format!(
        "You are an expert screenwriting assistant with full knowledge of the filmmaker's script. Use the context below to provide personalized, relevant advice.

IMPORTANT: Keep your responses short and concise (2-3 sentences maximum). Only answer if the user is asking a question.

CONTEXT:
{}

USER MESSAGE: {}

Please respond as a helpful screenwriting assistant, referencing specific characters, scenes, and previous conversation when relevant. Be conversational but professional. Keep answers brief and to the point.",
        context, user_message
    )
}

pub fn analyze_character(character: &Character) -> String {
    format!(
        "Analyze this character and provide development suggestions:

Name: {}
Age: {}
Description: {}
Personality: {}
Goals: {}
Conflicts: {}

Please provide:
1. Character arc suggestions
2. Dialogue style recommendations
3. Potential conflicts and obstacles
4. Character development opportunities",
        or(&character.name, ExportConstants::UNKNOWN_NAME),
        character.age.as_deref().unwrap_or(ExportConstants::UNKNOWN_AGE),
        or(&character.description, ExportConstants::NO_DESCRIPTION),
        or(&character.personality, ExportConstants::NO_PERSONALITY),
        or(&character.goals, "No goals specified"),
        or(&character.conflicts, "No conflicts specified"),
    )
}

pub fn modify_tone(text: &str, tone: &str) -> String {
    format!(
        "Rewrite the following text to match the tone: {tone}

Original text:
{text}

Please maintain the same meaning and structure while changing the tone to {tone}."
    )
}

pub fn modify_setting(scene_text: &str, setting: &str) -> String {
    format!(
        "Adapt the following scene to the new setting: {setting}

Original scene:
{scene_text}

Please rewrite the scene to fit the new setting while maintaining the core action and dialogue."
    )
}

pub fn generate_dialogue(character_name: &str, context: &str, emotion: &str) -> String {
    format!(
        "Generate dialogue for {character_name} in the following context:

Context: {context}
Emotion: {emotion}

Please write natural, character-appropriate dialogue that fits the context and emotion."
    )
}

pub fn analyze_scene(scene: &Scene) -> String {
    let number = scene
        .scene_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    format!(
        "Analyze this scene and provide improvement suggestions:

Scene: {} - {}
Location: {}
Time of Day: {}
Tone/Mood: {}
Characters: {}
Goal: {}
Conflict/Stakes: {}
Script Content: {}

Please provide:
1. Pacing analysis
2. Character interaction suggestions
3. Visual storytelling opportunities
4. Dialogue improvements
5. Scene structure recommendations
6. Location utilization suggestions
7. Tone and mood consistency
8. Goal and conflict clarity",
        number,
        or(&scene.title, "No title"),
        or(scene.place(), "No location"),
        or(&scene.time_of_day, "No time"),
        list_or(&scene.tone_mood, "No tone"),
        list_or(&scene.characters, "No characters"),
        or(&scene.goal, "No goal"),
        or(&scene.conflict_stakes, "No conflict"),
        or(&scene.action, "No content"),
    )
}

pub fn summarize(scene_text: &str) -> String {
    format!("Please provide a brief summary of this scene:\n\n{}", scene_text)
}

pub fn consistency_check(scene_text: &str) -> String {
    format!("Please check this scene for consistency issues:\n\n{}", scene_text)
}

pub fn next_action(scene_text: &str) -> String {
    format!(
        "Based on this scene, suggest what could happen next:\n\n{}",
        scene_text
    )
}

/// 由场景的元数据生成整场戏
pub fn auto_generate_scene(scene: &Scene) -> String {
    format!(
        "Generate a scene with the following details:
Title: {}
Location: {}
Time: {}
Tone: {}
Characters: {}
Goal: {}
Conflict: {}

Please generate a complete scene with action and dialogue mixed naturally.",
        scene.title,
        scene.place(),
        scene.time_of_day,
        scene.tone_mood.join(", "),
        scene.characters.join(", "),
        scene.goal,
        scene.conflict_stakes,
    )
}

pub fn process_scene(scene_text: &str) -> String {
    format!(
        "Please improve this scene by enhancing the dialogue, writing quality, and structure:

{scene_text}

Please provide improvements in these areas:
1. Dialogue: Make it more natural, character-specific, and engaging
2. Writing: Improve clarity, flow, and visual storytelling
3. Structure: Enhance pacing, scene beats, and dramatic tension

Return the improved scene text."
    )
}

pub fn custom_request(scene_text: &str, request: &str) -> String {
    format!(
        "Please modify this scene according to the following request:

REQUEST: {request}

CURRENT SCENE:
{scene_text}

Please return the modified scene text that addresses the request while maintaining the scene's core elements and structure."
    )
}

pub fn expand(scene_text: &str, expansion_type: &str) -> String {
    format!(
        "Expand the following scene with more {expansion_type}:

{scene_text}

Please add more {expansion_type} while maintaining the original structure and meaning."
    )
}

pub fn condense(scene_text: &str) -> String {
    format!(
        "Condense the following scene while maintaining all key plot points and character development:

{scene_text}

Please create a more concise version that preserves the essential elements."
    )
}

pub fn change_perspective(scene_text: &str, perspective: &str) -> String {
    format!(
        "Rewrite the following scene from a {perspective} perspective:

{scene_text}

Please maintain the same events and dialogue while changing the narrative perspective to {perspective}."
    )
}

pub fn add_conflict(scene_text: &str, conflict_type: &str) -> String {
    format!(
        "Add {conflict_type} conflict to the following scene:

{scene_text}

Please integrate the conflict naturally into the existing scene while maintaining character consistency."
    )
}

pub fn improve_dialogue(dialogue: &str, character_name: &str) -> String {
    format!(
        "Improve the following dialogue to be more natural and engaging:

Character: {character_name}
Dialogue: {dialogue}

Please make the dialogue more realistic, character-specific, and emotionally engaging."
    )
}

pub fn add_visual_elements(scene_text: &str) -> String {
    format!(
        "Add visual storytelling elements to the following scene:

{scene_text}

Please add cinematic details, visual cues, and atmospheric elements that enhance the visual storytelling."
    )
}

pub fn create_transition(scene1: &str, scene2: &str) -> String {
    format!(
        "Create a smooth transition between these two scenes:

Scene 1:
{scene1}

Scene 2:
{scene2}

Please write a brief transition that connects these scenes naturally and maintains narrative flow."
    )
}

pub fn fix_continuity(scene_text: &str, previous_scenes: &[String]) -> String {
    let previous = previous_scenes.join("\n\n");
    format!(
        "Fix any continuity issues in the following scene based on the previous scenes:

Previous scenes:
{previous}

Current scene:
{scene_text}

Please identify and fix any continuity issues while maintaining the scene's integrity."
    )
}

pub fn enhance_character_development(scene_text: &str, character_name: &str) -> String {
    format!(
        "Enhance the character development for {character_name} in the following scene:

{scene_text}

Please add elements that reveal more about {character_name}'s personality, motivations, or growth."
    )
}
