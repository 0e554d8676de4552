//! 文档组装
//!
//! 负责文档级结构：标题页、分页、场景顺序、角色表附录。

use log::debug;

use super::block::{Block, BlockKind, DocumentPayload};
use super::character_list::CharacterListRenderer;
use super::scene_builder::SceneBlockBuilder;
use super::style_table::StyleTable;
use crate::models::{Character, Scene};
use crate::utils::{or_placeholder, ExportConstants};

/// 文档组装器
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    styles: StyleTable,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(StyleTable::SCREENPLAY)
    }
}

impl DocumentAssembler {
    pub fn new(styles: StyleTable) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// 组装完整剧本
    ///
    /// 场景按调用方给定的顺序输出，不排序；角色表仅在角色非空时追加。
    pub fn build(
        &self,
        title: &str,
        author: &str,
        scenes: &[Scene],
        characters: &[Character],
    ) -> DocumentPayload {
        let title = or_placeholder(title, ExportConstants::DEFAULT_TITLE).trim();
        let author = or_placeholder(author, ExportConstants::DEFAULT_AUTHOR).trim();

        let mut blocks = self.title_page(title, author);

        let builder = SceneBlockBuilder::new(&self.styles);
        for scene in scenes {
            blocks.extend(builder.build(scene));
            blocks.push(Block::spacer());
        }

        if !characters.is_empty() {
            blocks.push(Block::page_break());
            blocks.extend(CharacterListRenderer::new(&self.styles).render(characters));
        }

        debug!(
            "【assembler】组装完成: {} 个场景, {} 个角色, {} 个块",
            scenes.len(),
            characters.len(),
            blocks.len()
        );

        DocumentPayload {
            title: title.to_string(),
            author: author.to_string(),
            blocks,
        }
    }

    /// 只包含标题页和一个场景的文档，没有角色表
    ///
    /// 标题页显示为 `<title> - Scene <编号>`。
    pub fn build_single_scene(&self, scene: &Scene, title: &str) -> DocumentPayload {
        let title = or_placeholder(title, "Scene").trim();
        let number = scene
            .scene_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| ExportConstants::UNKNOWN_NUMBER.to_string());
        let heading = format!("{} - Scene {}", title, number);
        self.build(&heading, "", std::slice::from_ref(scene), &[])
    }

    /// 标题页：标题、作者，随后强制分页
    fn title_page(&self, title: &str, author: &str) -> Vec<Block> {
        vec![
            Block::with_style(BlockKind::Title, title, &self.styles.title),
            Block::with_style(
                BlockKind::Byline,
                &format!("by {}", author),
                &self.styles.byline,
            ),
            Block::page_break(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_page_comes_first_then_page_break() {
        let payload = DocumentAssembler::default().build(
            "Night Shift",
            "",
            &[Scene::new(1, "Open", "Diner")],
            &[],
        );
        assert_eq!(
            &payload.kinds()[..4],
            &[
                BlockKind::Title,
                BlockKind::Byline,
                BlockKind::PageBreak,
                BlockKind::SceneHeading
            ]
        );
        assert_eq!(payload.blocks[0].text, "NIGHT SHIFT");
        assert_eq!(payload.blocks[1].text, "by Screenwriter");
    }

    #[test]
    fn appendix_only_when_characters_present() {
        let assembler = DocumentAssembler::default();
        let scenes = vec![Scene::new(1, "A", "Roof"), Scene::new(2, "B", "Street")];

        let without = assembler.build("T", "A", &scenes, &[]);
        assert_eq!(without.count(BlockKind::PageBreak), 1);
        assert_eq!(without.count(BlockKind::CharacterEntry), 0);
        assert_eq!(without.blocks.last().unwrap().kind, BlockKind::Spacer);

        let with = assembler.build("T", "A", &scenes, &[Character::new("Sam")]);
        assert_eq!(with.count(BlockKind::PageBreak), 2);
        let kinds = with.kinds();
        let second_break = kinds
            .iter()
            .rposition(|k| *k == BlockKind::PageBreak)
            .unwrap();
        assert_eq!(with.blocks[second_break + 1].text, "CHARACTER LIST");
        // 所有场景标题都在附录之前
        assert!(kinds[..second_break]
            .iter()
            .filter(|k| **k == BlockKind::SceneHeading)
            .count()
            == 2);
    }

    #[test]
    fn scenes_keep_caller_order_with_spacers() {
        let scenes = vec![Scene::new(9, "Late", "Roof"), Scene::new(1, "Early", "Bed")];
        let payload = DocumentAssembler::default().build("T", "A", &scenes, &[]);
        let texts = payload.texts();
        assert_eq!(texts[3], "SCENE 9 - ROOF");
        assert_eq!(payload.blocks[4].kind, BlockKind::Spacer);
        assert_eq!(texts[5], "SCENE 1 - BED");
    }

    #[test]
    fn single_scene_title_includes_number() {
        let payload =
            DocumentAssembler::default().build_single_scene(&Scene::new(4, "Chase", "Alley"), "Draft");
        assert_eq!(payload.blocks[0].text, "DRAFT - SCENE 4");
        assert_eq!(payload.count(BlockKind::SceneHeading), 1);
        assert_eq!(payload.count(BlockKind::PageBreak), 1);
    }
}
