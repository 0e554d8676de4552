use lazy_static::lazy_static;
use regex::Regex;

/// 导出时使用的占位文本
pub struct ExportConstants;

impl ExportConstants {
    pub const UNKNOWN_LOCATION: &'static str = "Unknown Location";
    pub const UNKNOWN_NUMBER: &'static str = "N/A";
    pub const UNKNOWN_NAME: &'static str = "Unknown";
    pub const UNKNOWN_AGE: &'static str = "Unknown";
    pub const NO_DESCRIPTION: &'static str = "No description";
    pub const NO_PERSONALITY: &'static str = "No personality traits";
    pub const CHARACTER_LIST_HEADING: &'static str = "CHARACTER LIST";
    pub const NOTES_PREFIX: &'static str = "NOTES: ";
    pub const DEFAULT_TITLE: &'static str = "Screenplay";
    pub const DEFAULT_AUTHOR: &'static str = "Screenwriter";
    pub const DOCX_EXTENSION: &'static str = "docx";
    /// 文件名中标题部分的字节上限，时间戳、序号和扩展名另计
    pub const MAX_SLUG_BYTES: usize = 120;
    /// 文件名时间戳格式
    pub const TIMESTAMP_FORMAT: &'static str = "%Y%m%d_%H%M%S";
}

lazy_static! {
    /// 文件名中允许保留的字符之外的一切
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^\p{L}\p{N}_\-]").unwrap();
    pub static ref REPEATED_UNDERSCORES: Regex = Regex::new(r"_{2,}").unwrap();
}
