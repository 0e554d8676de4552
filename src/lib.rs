pub mod api;
pub mod docx;
pub mod llm;
pub mod models;
pub mod storage;
pub mod utils;

pub use models::{
    AssetKind, Character, ChatMessage, Collection, Conf, Location, Note, Scene, Script,
    UserRecord,
};

pub use docx::{
    export_screenplay, export_single_scene, payload_to_base64, DocumentAssembler,
    DocumentPayload, ExportError, ExportOutcome, ScreenplayExporter, StyleTable,
};

pub use storage::{ChatStore, ScriptStatistics, ScriptWorkspace, StorageError, UserStore};

pub use llm::{GeminiClient, GenerationOptions, LlmError, ScreenwritingAssistant, TextGenerator};

pub use api::{
    export_json_to_docx, export_scene_to_docx, export_script_to_docx, export_stored_script,
    export_to_docx, export_to_docx_base64, ExportResult,
};
