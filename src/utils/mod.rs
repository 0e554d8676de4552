pub mod export_constants;

pub use export_constants::ExportConstants;
use export_constants::{REPEATED_UNDERSCORES, UNSAFE_FILENAME_CHARS};

/// 把标题变成文件名片段
///
/// 空格替换为下划线，去掉路径分隔符等一切不安全字符，
/// 超过 [`ExportConstants::MAX_SLUG_BYTES`] 时在字符边界处截断；
/// 结果为空时返回默认标题。
pub fn slugify(title: &str) -> String {
    let underscored = title.trim().replace(' ', "_");
    let stripped = UNSAFE_FILENAME_CHARS.replace_all(&underscored, "");
    let collapsed = REPEATED_UNDERSCORES.replace_all(&stripped, "_");
    let slug = truncate_at_char_boundary(&collapsed, ExportConstants::MAX_SLUG_BYTES)
        .trim_matches('_');
    if slug.is_empty() {
        ExportConstants::DEFAULT_TITLE.to_string()
    } else {
        slug.to_string()
    }
}

/// 取不超过 `max_bytes` 的最长前缀，不切开多字节字符
fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// 当前本地时间，ISO 8601 格式（微秒精度）
pub fn now_iso() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// 空白字符串回落到默认值
pub fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_replaces_spaces_and_strips_path_chars() {
        assert_eq!(slugify("The Pilot"), "The_Pilot");
        assert_eq!(slugify("../etc/passwd"), "etcpasswd");
        assert_eq!(slugify("a / b: c?"), "a_b_c");
        assert_eq!(slugify("黑色 爱情诗"), "黑色_爱情诗");
        assert_eq!(slugify("  ///  "), "Screenplay");
    }

    #[test]
    fn slugify_caps_long_titles_on_char_boundary() {
        let slug = slugify(&"黑色爱情诗".repeat(18));
        assert!(slug.len() <= ExportConstants::MAX_SLUG_BYTES);
        // 每个汉字 3 字节，120 字节正好 40 个字
        assert_eq!(slug.chars().count(), 40);
        assert!("黑色爱情诗".repeat(18).starts_with(&slug));

        let ascii = slugify(&format!("{}_tail", "a".repeat(119)));
        assert_eq!(ascii, "a".repeat(119));
        assert_eq!(slugify("Short title"), "Short_title");
    }

    #[test]
    fn placeholder_only_for_blank() {
        assert_eq!(or_placeholder("  ", "X"), "X");
        assert_eq!(or_placeholder("Kitchen", "X"), "Kitchen");
    }
}
