//! 剧本内的检索与统计

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Character, Location, Scene, Script};

fn matches_any(query: &str, fields: &[&str]) -> bool {
    fields.iter().any(|field| field.to_lowercase().contains(query))
}

/// 按名字、描述、性格检索角色；空查询返回全部
pub fn search_characters(script: &Script, query: &str) -> Vec<Character> {
    let query = query.trim().to_lowercase();
    script
        .characters
        .values()
        .filter(|c| {
            query.is_empty() || matches_any(&query, &[&c.name, &c.description, &c.personality])
        })
        .cloned()
        .collect()
}

/// 按标题、动作、地点、对白、目标、冲突检索场景
pub fn search_scenes(script: &Script, query: &str) -> Vec<Scene> {
    let query = query.trim().to_lowercase();
    script
        .scenes
        .values()
        .filter(|s| {
            query.is_empty()
                || matches_any(
                    &query,
                    &[
                        &s.title,
                        &s.action,
                        s.place(),
                        s.dialogue.as_deref().unwrap_or(""),
                        &s.goal,
                        &s.conflict_stakes,
                    ],
                )
        })
        .cloned()
        .collect()
}

/// 按名字、描述、光线检索地点
pub fn search_locations(script: &Script, query: &str) -> Vec<Location> {
    let query = query.trim().to_lowercase();
    script
        .locations
        .values()
        .filter(|l| {
            query.is_empty() || matches_any(&query, &[&l.name, &l.description, &l.lighting])
        })
        .cloned()
        .collect()
}

/// 按场景编号排序，没有编号的排在最前；编号相同保持插入顺序
pub fn scenes_by_number(script: &Script) -> Vec<Scene> {
    let mut scenes = script.scenes.to_vec();
    scenes.sort_by_key(|s| s.scene_number);
    scenes
}

/// 出场角色包含给定名字的场景
pub fn scenes_by_character(script: &Script, name: &str) -> Vec<Scene> {
    script
        .scenes
        .values()
        .filter(|s| s.features_character(name))
        .cloned()
        .collect()
}

/// 地点包含给定文本的场景（大小写不敏感）
pub fn scenes_by_location(script: &Script, location: &str) -> Vec<Scene> {
    let needle = location.to_lowercase();
    script
        .scenes
        .values()
        .filter(|s| s.place().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// setting 包含给定文本的场景；没有 setting 的场景按 location 匹配
pub fn scenes_by_setting(script: &Script, setting: &str) -> Vec<Scene> {
    let needle = setting.to_lowercase();
    script
        .scenes
        .values()
        .filter(|s| {
            let field = if s.setting.trim().is_empty() {
                &s.location
            } else {
                &s.setting
            };
            field.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// 类型包含给定文本的地点（Indoor、Outdoor、Public……）
pub fn locations_by_type(script: &Script, location_type: &str) -> Vec<Location> {
    let needle = location_type.to_lowercase();
    script
        .locations
        .values()
        .filter(|l| l.location_type.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// 剧本统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStatistics {
    pub total_scenes: usize,
    pub unique_characters: usize,
    pub unique_locations: usize,
    /// 动作描述的平均长度（按字素计）
    pub average_scene_length: f64,
}

impl ScriptStatistics {
    pub fn compute(script: &Script) -> Self {
        let total_scenes = script.scenes.len();

        let unique_characters = script
            .characters
            .values()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .collect::<HashSet<_>>()
            .len();

        let unique_locations = script
            .scenes
            .values()
            .map(|s| s.place())
            .filter(|loc| !loc.is_empty())
            .collect::<HashSet<_>>()
            .len();

        let total_length: usize = script
            .scenes
            .values()
            .map(|s| s.action.graphemes(true).count())
            .sum();
        let average_scene_length = if total_scenes > 0 {
            total_length as f64 / total_scenes as f64
        } else {
            0.0
        };

        ScriptStatistics {
            total_scenes,
            unique_characters,
            unique_locations,
            average_scene_length,
        }
    }
}
