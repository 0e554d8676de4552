//! 场景块构建
//!
//! 把一条场景记录转换为有序的块序列：
//! 场景标题 → 动作 → (角色, 对白)* → 备注。

use log::debug;

use super::block::Block;
use super::style_table::{StyleKind, StyleTable};
use crate::models::Scene;
use crate::utils::{or_placeholder, ExportConstants};

/// 场景块构建器
#[derive(Debug, Clone)]
pub struct SceneBlockBuilder<'a> {
    styles: &'a StyleTable,
}

impl<'a> SceneBlockBuilder<'a> {
    pub fn new(styles: &'a StyleTable) -> Self {
        Self { styles }
    }

    /// 构建一个场景的所有块；任何字段缺失都不会报错，至少输出场景标题
    pub fn build(&self, scene: &Scene) -> Vec<Block> {
        let mut blocks = vec![self.heading(scene)];

        if !scene.action.trim().is_empty() {
            blocks.push(self.block(StyleKind::Action, &scene.action));
        }

        blocks.extend(self.dialogue_blocks(scene));

        if let Some(notes) = scene.notes_text() {
            let text = format!("{}{}", ExportConstants::NOTES_PREFIX, notes);
            blocks.push(self.block(StyleKind::Note, &text));
        }

        debug!(
            "【scene_builder】场景 {:?} 生成 {} 个块",
            scene.scene_number,
            blocks.len()
        );
        blocks
    }

    /// `SCENE <编号> - <地点>`
    pub fn heading_text(scene: &Scene) -> String {
        let number = scene
            .scene_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| ExportConstants::UNKNOWN_NUMBER.to_string());
        let location = or_placeholder(scene.place(), ExportConstants::UNKNOWN_LOCATION);
        format!("SCENE {} - {}", number, location.trim().to_uppercase())
    }

    fn heading(&self, scene: &Scene) -> Block {
        self.block(StyleKind::SceneHeading, &Self::heading_text(scene))
    }

    /// 按位置配对角色和对白行
    ///
    /// 对白按换行拆分，第 i 行对应第 i 个角色，取两者中较短的长度；
    /// 多出来的角色或对白行直接丢弃。不识别真正的说话人。
    fn dialogue_blocks(&self, scene: &Scene) -> Vec<Block> {
        let dialogue = match scene.dialogue.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Vec::new(),
        };
        if scene.characters.is_empty() {
            return Vec::new();
        }

        let mut blocks = Vec::new();
        for (character, line) in scene.characters.iter().zip(dialogue.split('\n')) {
            blocks.push(self.block(StyleKind::CharacterCue, character.trim()));
            let line = line.trim();
            // 空行只保留角色名
            if !line.is_empty() {
                blocks.push(self.block(StyleKind::Dialogue, line));
            }
        }
        blocks
    }

    fn block(&self, kind: StyleKind, text: &str) -> Block {
        Block::styled(kind, text, self.styles.lookup(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::block::BlockKind;

    fn build(scene: &Scene) -> Vec<Block> {
        SceneBlockBuilder::new(&StyleTable::SCREENPLAY).build(scene)
    }

    #[test]
    fn full_scene_keeps_fixed_order() {
        let scene = Scene::new(3, "Lab", "lab")
            .with_action("Lights flicker.")
            .with_dialogue(&["Ana", "Ben"], "Who's there?\nJust me.")
            .with_notes("Shoot at dusk");
        let kinds: Vec<BlockKind> = build(&scene).iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::SceneHeading,
                BlockKind::Action,
                BlockKind::CharacterCue,
                BlockKind::Dialogue,
                BlockKind::CharacterCue,
                BlockKind::Dialogue,
                BlockKind::Note,
            ]
        );
    }

    #[test]
    fn empty_scene_is_heading_only() {
        let blocks = build(&Scene::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::SceneHeading);
        assert_eq!(blocks[0].text, "SCENE N/A - UNKNOWN LOCATION");
    }

    #[test]
    fn pairing_stops_at_shorter_sequence() {
        let scene = Scene::default().with_dialogue(&["A", "B", "C"], "line1\nline2");
        let blocks = build(&scene);
        let pairs: Vec<(&str, BlockKind)> =
            blocks.iter().skip(1).map(|b| (b.text.as_str(), b.kind)).collect();
        assert_eq!(
            pairs,
            vec![
                ("A", BlockKind::CharacterCue),
                ("line1", BlockKind::Dialogue),
                ("B", BlockKind::CharacterCue),
                ("line2", BlockKind::Dialogue),
            ]
        );
    }

    #[test]
    fn extra_dialogue_lines_are_dropped() {
        let scene = Scene::default().with_dialogue(&["A"], "one\ntwo\nthree");
        let blocks = build(&scene);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].text, "one");
    }

    #[test]
    fn dialogue_without_characters_emits_nothing() {
        let scene = Scene::default().with_dialogue(&[], "orphan line");
        assert_eq!(build(&scene).len(), 1);
    }

    #[test]
    fn blank_dialogue_line_keeps_only_the_cue() {
        let scene = Scene::default().with_dialogue(&["A", "B"], "   \nhi");
        let kinds: Vec<BlockKind> = build(&scene).iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::SceneHeading,
                BlockKind::CharacterCue,
                BlockKind::CharacterCue,
                BlockKind::Dialogue,
            ]
        );
    }

    #[test]
    fn notes_use_small_italic_style() {
        let scene = Scene::default().with_notes("Check continuity");
        let blocks = build(&scene);
        let note = blocks.last().unwrap();
        assert_eq!(note.kind, BlockKind::Note);
        assert_eq!(note.text, "NOTES: Check continuity");
        assert!(note.style.unwrap().italic);
    }
}
