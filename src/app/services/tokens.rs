//! `{page}` / `{pages}` substitution for header and footer templates.
//!
//! Users write `\{page\}` or `\{pages\}` to keep the token text literally.
//! Substitution is plain substring replacement; nothing in a template is
//! interpreted as a pattern.

pub const PAGE_TOKEN: &str = "{page}";
pub const PAGES_TOKEN: &str = "{pages}";
pub const ESCAPED_PAGE_TOKEN: &str = "\\{page\\}";
pub const ESCAPED_PAGES_TOKEN: &str = "\\{pages\\}";

// Assumed absent from templates. U+FFFF is a noncharacter and does not
// occur in ordinary text.
const PAGE_SENTINEL: &str = "\u{FFFF}HANGEULMD_ESC_PAGE\u{FFFF}";
const PAGES_SENTINEL: &str = "\u{FFFF}HANGEULMD_ESC_PAGES\u{FFFF}";

/// Replace every literal occurrence of `needle`. An empty needle is a no-op.
fn replace_all_literal(haystack: &str, needle: &str, value: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    haystack.replace(needle, value)
}

/// Substitute page tokens in `template`. `None` behaves as an empty template.
pub fn substitute(template: Option<&str>, page_num: usize, total_pages: usize) -> String {
    let text = template.unwrap_or_default();
    let protected = protect_escapes(text);
    let substituted = replace_tokens(&protected, page_num, total_pages);
    restore_escapes(&substituted)
}

/// Pass 1: hide escaped tokens behind sentinels.
fn protect_escapes(text: &str) -> String {
    let s = replace_all_literal(text, ESCAPED_PAGES_TOKEN, PAGES_SENTINEL);
    replace_all_literal(&s, ESCAPED_PAGE_TOKEN, PAGE_SENTINEL)
}

/// Pass 2: `{pages}` goes first so `{page}` never eats part of it.
fn replace_tokens(text: &str, page_num: usize, total_pages: usize) -> String {
    let s = replace_all_literal(text, PAGES_TOKEN, &total_pages.to_string());
    replace_all_literal(&s, PAGE_TOKEN, &page_num.to_string())
}

/// Pass 3: sentinels become the unescaped literal tokens.
fn restore_escapes(text: &str) -> String {
    let s = replace_all_literal(text, PAGES_SENTINEL, PAGES_TOKEN);
    replace_all_literal(&s, PAGE_SENTINEL, PAGE_TOKEN)
}
