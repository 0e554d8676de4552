//! Docx 适配器模块
//!
//! 把样式描述和块转换成 docx-rs 的结构，业务代码不直接接触 docx-rs。

use docx_rs;
use thiserror::Error;

use crate::docx::style_table::StyleDescriptor;

/// 对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentType {
    /// 左对齐
    Left,
    /// 居中对齐
    Center,
    /// 右对齐
    Right,
    /// 两端对齐
    Justify,
}

impl AlignmentType {
    /// 转换为 docx-rs 的 AlignmentType
    pub fn to_docx_alignment(&self) -> docx_rs::AlignmentType {
        match self {
            AlignmentType::Left => docx_rs::AlignmentType::Left,
            AlignmentType::Center => docx_rs::AlignmentType::Center,
            AlignmentType::Right => docx_rs::AlignmentType::Right,
            AlignmentType::Justify => docx_rs::AlignmentType::Justified,
        }
    }
}

/// 将英寸转换为 twip
pub fn convert_inches_to_twip(inches: f32) -> i32 {
    (inches * 1440.0).round() as i32
}

/// 将磅转换为 twip（段落间距用）
pub fn convert_point_to_twip(point: f32) -> i32 {
    (point * 20.0).round() as i32
}

/// 将磅转换为半磅（docx 字号单位，12 磅传 24）
pub fn convert_point_to_half_points(point: f32) -> usize {
    (point * 2.0).round().max(0.0) as usize
}

/// 页面边距 //英寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for PageMargins {
    /// 剧本格式：左侧留出装订边
    fn default() -> Self {
        PageMargins {
            top: 1.0,
            bottom: 1.0,
            left: 1.5,
            right: 1.0,
        }
    }
}

impl PageMargins {
    pub fn to_docx_page_margin(&self) -> docx_rs::PageMargin {
        docx_rs::PageMargin::new()
            .top(convert_inches_to_twip(self.top))
            .bottom(convert_inches_to_twip(self.bottom))
            .left(convert_inches_to_twip(self.left))
            .right(convert_inches_to_twip(self.right))
    }
}

/// DOCX适配器错误
#[derive(Error, Debug)]
pub enum DocxAdapterError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to pack docx archive: {0}")]
    PackError(String),
}

/// DOCX适配器结果
pub type DocxAdapterResult<T> = Result<T, DocxAdapterError>;

/// 由样式描述生成运行属性
pub fn run_property_for(style: &StyleDescriptor) -> docx_rs::RunProperty {
    let mut property = docx_rs::RunProperty::new()
        .size(convert_point_to_half_points(style.point_size))
        .fonts(run_fonts(style.font_family));

    if style.bold {
        property = property.bold();
    }

    if style.italic {
        property = property.italic();
    }

    property
}

/// 由样式描述生成段落属性
pub fn paragraph_property_for(style: &StyleDescriptor) -> docx_rs::ParagraphProperty {
    docx_rs::ParagraphProperty::new()
        .align(style.alignment.to_docx_alignment())
        .indent(
            Some(convert_inches_to_twip(style.left_indent)),
            None,
            Some(convert_inches_to_twip(style.right_indent)),
            None,
        )
}

pub(crate) fn run_fonts(font: &str) -> docx_rs::RunFonts {
    docx_rs::RunFonts::new()
        .east_asia(font)
        .ascii(font)
        .hi_ansi(font)
}

/// 导出 docx 子模块
pub mod docx;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversions() {
        assert_eq!(convert_inches_to_twip(1.5), 2160);
        assert_eq!(convert_inches_to_twip(0.0), 0);
        assert_eq!(convert_point_to_half_points(12.0), 24);
        assert_eq!(convert_point_to_half_points(10.0), 20);
        assert_eq!(convert_point_to_twip(28.0), 560);
    }
}
