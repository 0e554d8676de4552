//! Docx 文档封装
//!
//! 把组装好的块序列写成 docx-rs 文档并打包成字节。

use super::*;
use crate::docx::block::{Block, BlockKind, DocumentPayload};
use crate::docx::style_table::{StyleKind, StyleTable};
use docx_rs;
use log::debug;
use std::io::Cursor;

/// 文档
pub struct Document {
    docx: docx_rs::Docx,
    paragraph_count: usize,
}

impl Document {
    /// 创建新的文档，注册样式表中的段落样式并设置页边距
    pub fn new(styles: &StyleTable, margins: PageMargins) -> Self {
        let mut docx = docx_rs::Docx::new().page_margin(margins.to_docx_page_margin());

        for kind in StyleKind::ALL {
            let descriptor = styles.lookup(kind);
            let mut docx_style =
                docx_rs::Style::new(kind.style_id(), docx_rs::StyleType::Paragraph)
                    .name(kind.display_name());
            // 直接设置字段而不是调用方法
            docx_style.run_property = run_property_for(descriptor);
            docx_style.paragraph_property = paragraph_property_for(descriptor);
            docx = docx.add_style(docx_style);
        }

        Self {
            docx,
            paragraph_count: 0,
        }
    }

    /// 由整个文档载荷创建
    pub fn from_payload(payload: &DocumentPayload, styles: &StyleTable) -> Self {
        let mut document = Document::new(styles, PageMargins::default());
        for block in &payload.blocks {
            document.add_block(block);
        }
        document
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraph_count
    }

    /// 添加一个块，对应一个段落
    pub fn add_block(&mut self, block: &Block) -> &mut Self {
        let paragraph = match block.kind {
            BlockKind::PageBreak => docx_rs::Paragraph::new()
                .add_run(docx_rs::Run::new().add_break(docx_rs::BreakType::Page)),
            BlockKind::Spacer => docx_rs::Paragraph::new(),
            _ => Self::text_paragraph(block),
        };
        self.add_paragraph(paragraph)
    }

    fn add_paragraph(&mut self, paragraph: docx_rs::Paragraph) -> &mut Self {
        let docx = std::mem::take(&mut self.docx);
        self.docx = docx.add_paragraph(paragraph);
        self.paragraph_count += 1;
        self
    }

    /// 文本段落；样式同时以段落样式引用和直接格式写入，
    /// 这样不认识自定义样式的阅读器也能正确显示
    fn text_paragraph(block: &Block) -> docx_rs::Paragraph {
        let mut paragraph = docx_rs::Paragraph::new();
        if let Some(style_id) = block.style_id {
            paragraph = paragraph.style(style_id);
        }

        let mut run = docx_rs::Run::new();
        // 文本里的换行变成软换行，不做任何重排
        for (i, line) in block.text.split('\n').enumerate() {
            if i > 0 {
                run = run.add_break(docx_rs::BreakType::TextWrapping);
            }
            run = run.add_text(line.trim_end_matches('\r'));
        }

        if let Some(style) = &block.style {
            run = run
                .size(convert_point_to_half_points(style.point_size))
                .fonts(run_fonts(style.font_family));
            if style.bold {
                run = run.bold();
            }
            if style.italic {
                run = run.italic();
            }

            paragraph = paragraph.align(style.alignment.to_docx_alignment()).indent(
                Some(convert_inches_to_twip(style.left_indent)),
                None,
                Some(convert_inches_to_twip(style.right_indent)),
                None,
            );
            if style.space_before > 0.0 {
                paragraph = paragraph.line_spacing(
                    docx_rs::LineSpacing::new().before(convert_point_to_twip(style.space_before) as u32),
                );
            }
        }

        paragraph.add_run(run)
    }

    /// 打包成 .docx 字节
    pub fn to_bytes(self) -> DocxAdapterResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.docx
            .build()
            .pack(&mut cursor)
            .map_err(|e| DocxAdapterError::PackError(e.to_string()))?;
        let bytes = cursor.into_inner();
        debug!(
            "【docx】打包完成: {} 个段落, {} 字节",
            self.paragraph_count,
            bytes.len()
        );
        Ok(bytes)
    }
}

/// 把载荷序列化为 .docx 字节
pub fn render_payload(payload: &DocumentPayload, styles: &StyleTable) -> DocxAdapterResult<Vec<u8>> {
    Document::from_payload(payload, styles).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::assembler::DocumentAssembler;
    use crate::models::Scene;
    use std::io::Read;

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn one_paragraph_per_block() {
        let payload = DocumentAssembler::default().build(
            "Pilot",
            "Me",
            &[Scene::new(1, "Open", "Kitchen").with_action("Sam enters.")],
            &[],
        );
        let document = Document::from_payload(&payload, &StyleTable::SCREENPLAY);
        assert_eq!(document.paragraph_count(), payload.blocks.len());
    }

    #[test]
    fn packed_archive_contains_text_and_page_break() {
        let payload = DocumentAssembler::default().build(
            "Pilot",
            "Me",
            &[Scene::new(1, "Open", "Kitchen").with_action("line one\nline two")],
            &[],
        );
        let bytes = render_payload(&payload, &StyleTable::SCREENPLAY).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let xml = document_xml(&bytes);
        assert!(xml.contains("PILOT"));
        assert!(xml.contains("SCENE 1 - KITCHEN"));
        assert!(xml.contains("line one"));
        assert!(xml.contains("line two"));
        assert!(xml.contains(r#"w:type="page""#));
    }
}
