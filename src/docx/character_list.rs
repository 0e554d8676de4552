use super::block::{Block, BlockKind};
use super::style_table::{StyleKind, StyleTable};
use crate::models::Character;
use crate::utils::{or_placeholder, ExportConstants};

/// 角色表（附录）渲染器
#[derive(Debug, Clone)]
pub struct CharacterListRenderer<'a> {
    styles: &'a StyleTable,
}

impl<'a> CharacterListRenderer<'a> {
    pub fn new(styles: &'a StyleTable) -> Self {
        Self { styles }
    }

    /// 按传入顺序渲染，不排序也不去重
    pub fn render(&self, characters: &[Character]) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(1 + characters.len() * 4);
        blocks.push(Block::styled(
            StyleKind::SceneHeading,
            ExportConstants::CHARACTER_LIST_HEADING,
            self.styles.lookup(StyleKind::SceneHeading),
        ));

        let action = self.styles.lookup(StyleKind::Action);
        for character in characters {
            blocks.push(Block::with_style(
                BlockKind::CharacterEntry,
                &Self::entry_text(character),
                &self.styles.character_entry,
            ));
            blocks.push(Block::styled(
                StyleKind::Action,
                or_placeholder(&character.description, ExportConstants::NO_DESCRIPTION),
                action,
            ));
            blocks.push(Block::styled(
                StyleKind::Action,
                or_placeholder(&character.personality, ExportConstants::NO_PERSONALITY),
                action,
            ));
            blocks.push(Block::spacer());
        }
        blocks
    }

    /// `<NAME> (Age: <age>)`
    pub fn entry_text(character: &Character) -> String {
        let name = or_placeholder(&character.name, ExportConstants::UNKNOWN_NAME);
        let age = character
            .age
            .as_deref()
            .map(|a| or_placeholder(a, ExportConstants::UNKNOWN_AGE))
            .unwrap_or(ExportConstants::UNKNOWN_AGE);
        format!("{} (Age: {})", name.trim().to_uppercase(), age.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_entries_in_input_order_with_duplicates() {
        let characters = vec![
            Character::new("Zed").age(40),
            Character::new("amy"),
            Character::new("Zed").description("Twin."),
        ];
        let blocks = CharacterListRenderer::new(&StyleTable::SCREENPLAY).render(&characters);
        assert_eq!(blocks.len(), 1 + 3 * 4);
        assert_eq!(blocks[0].text, "CHARACTER LIST");
        assert_eq!(blocks[0].kind, BlockKind::SceneHeading);
        assert_eq!(blocks[1].text, "ZED (Age: 40)");
        assert_eq!(blocks[5].text, "AMY (Age: Unknown)");
        assert_eq!(blocks[6].text, "No description");
        assert_eq!(blocks[7].text, "No personality traits");
        assert_eq!(blocks[9].text, "ZED (Age: Unknown)");
        assert_eq!(blocks[10].text, "Twin.");
    }

    #[test]
    fn description_and_personality_use_action_style() {
        let blocks = CharacterListRenderer::new(&StyleTable::SCREENPLAY)
            .render(&[Character::new("Sam").description("Tired.").personality("Dry wit.")]);
        assert_eq!(blocks[2].kind, BlockKind::Action);
        assert_eq!(blocks[3].kind, BlockKind::Action);
        assert_eq!(blocks[2].style, Some(StyleTable::SCREENPLAY.action));
        assert!(blocks[1].style.unwrap().bold);
        assert_eq!(blocks[4].kind, BlockKind::Spacer);
    }
}
