/// Extract filename from a file path
///
/// Accepts both `/` and `\` separators, since paths may come from any
/// platform's file dialog. Returns "Unknown" if no name can be extracted.
pub fn extract_filename(path: &str) -> String {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Strip a single trailing line ending (`\n` or `\r\n`).
pub fn strip_line_ending(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename_from_path() {
        assert_eq!(extract_filename("/home/user/test.md"), "test.md");
        assert_eq!(extract_filename("test.md"), "test.md");
        assert_eq!(extract_filename("/path/with/many/levels/file.md"), "file.md");
    }

    #[test]
    fn test_extract_filename_windows_separators() {
        assert_eq!(extract_filename("C:\\Users\\kim\\보고서.md"), "보고서.md");
        assert_eq!(extract_filename("D:/mixed\\dir/notes.md"), "notes.md");
    }

    #[test]
    fn test_extract_filename_edge_cases() {
        assert_eq!(extract_filename("/home/user/"), "user");
        assert_eq!(extract_filename(""), "Unknown");
        assert_eq!(extract_filename("."), "Unknown");
        assert_eq!(extract_filename("/"), "Unknown");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c > \"d\""), "a &lt; b &amp; c &gt; &quot;d&quot;");
        assert_eq!(escape_html("plain 텍스트"), "plain 텍스트");
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("---\r\n"), "---");
        assert_eq!(strip_line_ending("---\n"), "---");
        assert_eq!(strip_line_ending("---"), "---");
    }
}
