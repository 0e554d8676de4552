pub mod adapter;
pub mod assembler;
pub mod block;
pub mod character_list;
pub mod export;
pub mod scene_builder;
pub mod style_table;

pub use assembler::DocumentAssembler;
pub use block::{Block, BlockKind, DocumentPayload};
pub use character_list::CharacterListRenderer;
pub use export::{
    export_screenplay, export_single_scene, ExportError, ExportOutcome, ExportResult,
    ScreenplayExporter,
};
pub use scene_builder::SceneBlockBuilder;
pub use style_table::{StyleDescriptor, StyleKind, StyleTable};

// 从 adapter 导出
pub use adapter::{
    convert_inches_to_twip, AlignmentType, DocxAdapterError, DocxAdapterResult, PageMargins,
};
pub use adapter::docx::{render_payload, Document};

/// 把载荷序列化后做 Base64 编码，用于不落盘的下载
pub fn payload_to_base64(payload: &DocumentPayload, styles: &StyleTable) -> ExportResult<String> {
    let bytes = render_payload(payload, styles)?;
    Ok(base64::encode(&bytes))
}
