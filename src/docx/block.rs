use super::style_table::{StyleDescriptor, StyleKind};

/// 块的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Title,
    Byline,
    SceneHeading,
    Action,
    CharacterCue,
    Dialogue,
    Parenthetical,
    Note,
    CharacterEntry,
    /// 空段落
    Spacer,
    /// 强制分页
    PageBreak,
}

impl From<StyleKind> for BlockKind {
    fn from(kind: StyleKind) -> Self {
        match kind {
            StyleKind::SceneHeading => BlockKind::SceneHeading,
            StyleKind::Action => BlockKind::Action,
            StyleKind::CharacterCue => BlockKind::CharacterCue,
            StyleKind::Dialogue => BlockKind::Dialogue,
            StyleKind::Parenthetical => BlockKind::Parenthetical,
            StyleKind::Note => BlockKind::Note,
        }
    }
}

/// 一个带样式的输出单元
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    /// 渲染时使用的样式；空段落和分页没有样式
    pub style: Option<StyleDescriptor>,
    /// 对应的 docx 段落样式 id
    pub style_id: Option<&'static str>,
}

impl Block {
    /// 使用样式表中某个种类的样式创建块
    pub fn styled(kind: StyleKind, text: &str, style: &StyleDescriptor) -> Self {
        Block {
            kind: kind.into(),
            text: style.apply_case(text),
            style: Some(*style),
            style_id: Some(kind.style_id()),
        }
    }

    /// 使用单独样式（标题页、角色表标题行）创建块
    pub fn with_style(kind: BlockKind, text: &str, style: &StyleDescriptor) -> Self {
        Block {
            kind,
            text: style.apply_case(text),
            style: Some(*style),
            style_id: None,
        }
    }

    pub fn spacer() -> Self {
        Block {
            kind: BlockKind::Spacer,
            text: String::new(),
            style: None,
            style_id: None,
        }
    }

    pub fn page_break() -> Self {
        Block {
            kind: BlockKind::PageBreak,
            text: String::new(),
            style: None,
            style_id: None,
        }
    }
}

/// 组装完成、尚未序列化的文档
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPayload {
    pub title: String,
    pub author: String,
    pub blocks: Vec<Block>,
}

impl DocumentPayload {
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|b| b.kind).collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }

    /// 某种块的数量
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind == kind).count()
    }
}
