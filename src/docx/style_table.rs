//! 样式表
//!
//! 每种块对应一组固定的排版属性。外观的修改只需要改这里，
//! 其它组件只按种类查表，不再自行判断字体、缩进等细节。

use crate::docx::adapter::AlignmentType;

/// 剧本正文中的六种段落样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    SceneHeading,
    Action,
    CharacterCue,
    Dialogue,
    Parenthetical,
    Note,
}

impl StyleKind {
    pub const ALL: [StyleKind; 6] = [
        StyleKind::SceneHeading,
        StyleKind::Action,
        StyleKind::CharacterCue,
        StyleKind::Dialogue,
        StyleKind::Parenthetical,
        StyleKind::Note,
    ];

    /// 写入 docx 的段落样式 id
    pub fn style_id(&self) -> &'static str {
        match self {
            StyleKind::SceneHeading => "SceneHeading",
            StyleKind::Action => "Action",
            StyleKind::CharacterCue => "Character",
            StyleKind::Dialogue => "Dialogue",
            StyleKind::Parenthetical => "Parenthetical",
            StyleKind::Note => "Note",
        }
    }

    /// 在 Word 样式列表里显示的名字
    pub fn display_name(&self) -> &'static str {
        match self {
            StyleKind::SceneHeading => "Scene Heading",
            StyleKind::Action => "Action",
            StyleKind::CharacterCue => "Character",
            StyleKind::Dialogue => "Dialogue",
            StyleKind::Parenthetical => "Parenthetical",
            StyleKind::Note => "Note",
        }
    }
}

/// 样式描述
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleDescriptor {
    pub font_family: &'static str,
    /// 字号 //磅
    pub point_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub all_caps: bool,
    /// 左缩进 //英寸
    pub left_indent: f32,
    /// 右缩进 //英寸
    pub right_indent: f32,
    pub alignment: AlignmentType,
    /// 段前间距 //磅
    pub space_before: f32,
}

impl StyleDescriptor {
    const fn courier(point_size: f32) -> Self {
        StyleDescriptor {
            font_family: "Courier New",
            point_size,
            bold: false,
            italic: false,
            all_caps: false,
            left_indent: 0.0,
            right_indent: 0.0,
            alignment: AlignmentType::Left,
            space_before: 0.0,
        }
    }

    /// 按样式要求处理文本（目前只有全大写）
    pub fn apply_case(&self, text: &str) -> String {
        if self.all_caps {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }
}

/// 不可变样式表
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    pub scene_heading: StyleDescriptor,
    pub action: StyleDescriptor,
    pub character_cue: StyleDescriptor,
    pub dialogue: StyleDescriptor,
    pub parenthetical: StyleDescriptor,
    pub note: StyleDescriptor,
    /// 标题页：标题行
    pub title: StyleDescriptor,
    /// 标题页：作者行
    pub byline: StyleDescriptor,
    /// 角色表：每个角色的粗体标题行
    pub character_entry: StyleDescriptor,
}

impl StyleTable {
    /// 标准剧本格式
    pub const SCREENPLAY: StyleTable = StyleTable {
        scene_heading: StyleDescriptor {
            bold: true,
            all_caps: true,
            ..StyleDescriptor::courier(12.0)
        },
        action: StyleDescriptor::courier(12.0),
        character_cue: StyleDescriptor {
            bold: true,
            all_caps: true,
            left_indent: 3.5,
            right_indent: 2.0,
            ..StyleDescriptor::courier(12.0)
        },
        dialogue: StyleDescriptor {
            left_indent: 2.5,
            right_indent: 2.5,
            ..StyleDescriptor::courier(12.0)
        },
        parenthetical: StyleDescriptor {
            italic: true,
            left_indent: 3.0,
            right_indent: 2.5,
            ..StyleDescriptor::courier(12.0)
        },
        note: StyleDescriptor {
            italic: true,
            left_indent: 0.5,
            ..StyleDescriptor::courier(10.0)
        },
        title: StyleDescriptor {
            bold: true,
            all_caps: true,
            alignment: AlignmentType::Center,
            ..StyleDescriptor::courier(24.0)
        },
        byline: StyleDescriptor {
            alignment: AlignmentType::Center,
            // 约等于标题和作者之间空两行
            space_before: 28.0,
            ..StyleDescriptor::courier(14.0)
        },
        // 只有名字大写，"(Age: ..)" 保持原样，所以不能整行大写
        character_entry: StyleDescriptor {
            bold: true,
            ..StyleDescriptor::courier(12.0)
        },
    };

    /// 按种类查表，永不失败
    pub fn lookup(&self, kind: StyleKind) -> &StyleDescriptor {
        match kind {
            StyleKind::SceneHeading => &self.scene_heading,
            StyleKind::Action => &self.action,
            StyleKind::CharacterCue => &self.character_cue,
            StyleKind::Dialogue => &self.dialogue,
            StyleKind::Parenthetical => &self.parenthetical,
            StyleKind::Note => &self.note,
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        StyleTable::SCREENPLAY
    }
}
