//! Editor HTML to Markdown, for when the editor cannot serialize itself.
//!
//! Covers what the editor produces: headings, paragraphs, emphasis, strong,
//! strike, inline and fenced code, blockquotes, nested lists, links,
//! images, rules, hard breaks and GFM tables. Unknown elements contribute
//! their content.

use kuchiki::{NodeData, NodeRef};

use crate::app::infrastructure::html_tree::{HtmlTree, is_page_break_node};

pub fn html_to_markdown(html: &str) -> String {
    let tree = HtmlTree::parse(html);
    let blocks = render_blocks(tree.body());
    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .map(|el| el.name.local.as_ref().to_ascii_lowercase())
}

fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()
        .and_then(|el| el.attributes.borrow().get(name).map(|v| v.to_string()))
}

fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "h1" | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "p"
            | "hr"
            | "pre"
            | "blockquote"
            | "ul"
            | "ol"
            | "table"
            | "div"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "main"
    )
}

fn render_blocks(node: &NodeRef) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut loose = String::new();

    for child in node.children() {
        let block_tag = tag_name(&child).filter(|t| is_block_tag(t));
        let is_break = is_page_break_node(&child);
        if block_tag.is_none() && !is_break {
            loose.push_str(&render_inline(&child));
            continue;
        }
        flush_loose(&mut loose, &mut blocks);
        let rendered = if is_break {
            Some("---".to_string())
        } else {
            block_tag.and_then(|tag| render_block(&child, &tag))
        };
        if let Some(block) = rendered {
            blocks.push(block);
        }
    }
    flush_loose(&mut loose, &mut blocks);
    blocks
}

fn flush_loose(loose: &mut String, blocks: &mut Vec<String>) {
    let text = loose.trim();
    if !text.is_empty() {
        blocks.push(escape_line_starts(text));
    }
    loose.clear();
}

fn render_block(node: &NodeRef, tag: &str) -> Option<String> {
    let block = match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse::<usize>().unwrap_or(1);
            format!("{} {}", "#".repeat(level), inline_children(node).trim())
        }
        "p" => {
            let text = inline_children(node);
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            escape_line_starts(text)
        }
        "hr" => "---".to_string(),
        "pre" => render_code_block(node),
        "blockquote" => quote(&render_blocks(node).join("\n\n")),
        "ul" => render_list(node, None),
        "ol" => {
            let start = attr(node, "start")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(1);
            render_list(node, Some(start))
        }
        "table" => render_table(node)?,
        _ => {
            let inner = render_blocks(node);
            if inner.is_empty() {
                return None;
            }
            inner.join("\n\n")
        }
    };
    Some(block)
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_code_block(node: &NodeRef) -> String {
    let code = node
        .children()
        .find(|c| tag_name(c).as_deref() == Some("code"));
    let language = code
        .as_ref()
        .and_then(|c| attr(c, "class"))
        .and_then(|classes| {
            classes
                .split_ascii_whitespace()
                .find_map(|c| c.strip_prefix("language-").map(|l| l.to_string()))
        })
        .unwrap_or_default();
    let text = code
        .as_ref()
        .map(|c| c.text_contents())
        .unwrap_or_else(|| node.text_contents());
    let fence = if text.contains("```") { "````" } else { "```" };
    format!(
        "{}{}\n{}\n{}",
        fence,
        language,
        text.strip_suffix('\n').unwrap_or(&text),
        fence
    )
}

fn render_list(node: &NodeRef, ordered_start: Option<usize>) -> String {
    let mut items = Vec::new();
    let mut number = ordered_start.unwrap_or(1);

    for item in node.children() {
        if tag_name(&item).as_deref() != Some("li") {
            continue;
        }
        let marker = match ordered_start {
            Some(_) => format!("{}. ", number),
            None => "- ".to_string(),
        };
        number += 1;

        let body = render_blocks(&item).join("\n");
        let indent = " ".repeat(marker.len());
        let mut lines = body.lines();
        let mut rendered = format!("{}{}", marker, lines.next().unwrap_or(""));
        for line in lines {
            rendered.push('\n');
            if !line.is_empty() {
                rendered.push_str(&indent);
                rendered.push_str(line);
            }
        }
        items.push(rendered.trim_end().to_string());
    }
    items.join("\n")
}

fn render_table(node: &NodeRef) -> Option<String> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    collect_rows(node, &mut rows);
    let width = rows.iter().map(|r| r.len()).max()?;
    if width == 0 {
        return None;
    }

    let line = |cells: &[String]| {
        let mut padded: Vec<String> = cells.to_vec();
        padded.resize(width, String::new());
        format!("| {} |", padded.join(" | "))
    };

    let mut out = vec![line(&rows[0])];
    out.push(format!("|{}", " --- |".repeat(width)));
    for row in &rows[1..] {
        out.push(line(row));
    }
    Some(out.join("\n"))
}

fn collect_rows(node: &NodeRef, rows: &mut Vec<Vec<String>>) {
    for child in node.children() {
        match tag_name(&child).as_deref() {
            Some("tr") => {
                let cells = child
                    .children()
                    .filter(|c| matches!(tag_name(c).as_deref(), Some("td") | Some("th")))
                    .map(|c| {
                        let blocks = render_blocks(&c).join(" ");
                        blocks.replace('|', "\\|").replace('\n', " ")
                    })
                    .collect();
                rows.push(cells);
            }
            Some("thead") | Some("tbody") | Some("tfoot") => collect_rows(&child, rows),
            _ => {}
        }
    }
}

fn inline_children(node: &NodeRef) -> String {
    node.children().map(|c| render_inline(&c)).collect()
}

fn render_inline(node: &NodeRef) -> String {
    match node.data() {
        NodeData::Text(text) => escape_inline(&collapse_whitespace(&text.borrow())),
        NodeData::Element(_) => {
            let tag = tag_name(node).unwrap_or_default();
            match tag.as_str() {
                "strong" | "b" => wrap_inline(node, "**"),
                "em" | "i" => wrap_inline(node, "*"),
                "s" | "del" | "strike" => wrap_inline(node, "~~"),
                "code" => {
                    let text = node.text_contents();
                    let ticks = if text.contains('`') { "``" } else { "`" };
                    format!("{}{}{}", ticks, text, ticks)
                }
                "a" => {
                    let href = attr(node, "href").unwrap_or_default();
                    format!("[{}]({})", inline_children(node).trim(), href)
                }
                "img" => format!(
                    "![{}]({})",
                    attr(node, "alt").unwrap_or_default(),
                    attr(node, "src").unwrap_or_default()
                ),
                "br" => "  \n".to_string(),
                _ => inline_children(node),
            }
        }
        _ => String::new(),
    }
}

fn wrap_inline(node: &NodeRef, mark: &str) -> String {
    let inner = inline_children(node);
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return inner;
    }
    format!("{}{}{}", mark, trimmed, mark)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '*' | '_' | '`' | '[' | ']') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape paragraph lines that would otherwise read back as block syntax:
/// headings, quotes, bullets, ordered markers, rules, setext underlines and
/// `~~~` fences.
fn escape_line_starts(text: &str) -> String {
    text.split('\n')
        .map(|line| match block_syntax_offset(line) {
            Some(at) => format!("{}\\{}", &line[..at], &line[at..]),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset where a backslash neutralizes leading block syntax.
fn block_syntax_offset(line: &str) -> Option<usize> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    let body = &line[indent..];
    let first = body.chars().next()?;
    let rest = &body[first.len_utf8()..];
    let is_rule = body.chars().all(|c| c == first || c == ' ');

    let escape = match first {
        '#' | '>' => true,
        '-' | '+' | '*' => rest.is_empty() || rest.starts_with(' ') || is_rule,
        '=' | '_' => is_rule,
        '~' => rest.starts_with("~~"),
        '0'..='9' => {
            let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            let after = &body[digits..];
            let marker = after.starts_with('.') || after.starts_with(')');
            if marker && (after.len() == 1 || after[1..].starts_with(' ')) {
                return Some(indent + digits);
            }
            false
        }
        _ => false,
    };
    escape.then_some(indent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::html_tree::split_markup;

    #[test]
    fn test_headings_paragraphs_and_breaks() {
        let html = r#"<h1>T</h1><p>a <strong>b</strong></p><hr class="page-break-node"><p>c</p>"#;
        assert_eq!(html_to_markdown(html), "# T\n\na **b**\n\n---\n\nc\n");
    }

    #[test]
    fn test_inline_marks() {
        let html = r#"<p><em>e</em> <s>s</s> <code>x`y</code> <a href="https://a.b">link</a> <img src="i.png" alt="pic"></p>"#;
        assert_eq!(
            html_to_markdown(html),
            "*e* ~~s~~ ``x`y`` [link](https://a.b) ![pic](i.png)\n"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(html_to_markdown("<p>2*3 [x]</p>"), "2\\*3 \\[x\\]\n");
    }

    #[test]
    fn test_nested_lists() {
        let html = "<ul><li><p>one</p><ul><li><p>inner</p></li></ul></li><li><p>two</p></li></ul>";
        assert_eq!(html_to_markdown(html), "- one\n  - inner\n- two\n");
    }

    #[test]
    fn test_ordered_list_start() {
        let html = r#"<ol start="3"><li><p>c</p></li><li><p>d</p></li></ol>"#;
        assert_eq!(html_to_markdown(html), "3. c\n4. d\n");
    }

    #[test]
    fn test_blockquote() {
        let html = "<blockquote><p>a</p><p>b</p></blockquote>";
        assert_eq!(html_to_markdown(html), "> a\n>\n> b\n");
    }

    #[test]
    fn test_fenced_code_with_language() {
        let html = "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>";
        assert_eq!(html_to_markdown(html), "```rust\nfn main() {}\n```\n");
    }

    #[test]
    fn test_table() {
        let html = "<table><thead><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>1</td><td>x|y</td></tr></tbody></table>";
        assert_eq!(
            html_to_markdown(html),
            "| a | b |\n| --- | --- |\n| 1 | x\\|y |\n"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_markdown(""), "");
        assert_eq!(html_to_markdown("<p></p>"), "");
    }

    #[test]
    fn test_paragraph_rule_text_is_not_a_page_break() {
        let html = "<p>Intro</p><p>---</p><p>Outro</p>";
        let md = html_to_markdown(html);
        assert_eq!(md, "Intro\n\n\\---\n\nOutro\n");

        let reloaded = crate::app::services::markdown::render_markdown(&md);
        assert_eq!(split_markup(&reloaded).len(), split_markup(html).len());
        assert!(!reloaded.contains("<hr"));
    }

    #[test]
    fn test_block_syntax_in_paragraphs_stays_text() {
        let html = "<p># not a heading</p><p>1. not a list</p><p>2) nor this</p>\
                    <p>- dash</p><p>+ plus</p><p>&gt; quote</p><p>~~~</p><p>===</p>";
        let md = html_to_markdown(html);
        assert_eq!(
            md,
            "\\# not a heading\n\n1\\. not a list\n\n2\\) nor this\n\n\\- dash\n\n\\+ plus\n\n\\> quote\n\n\\~~~\n\n\\===\n"
        );

        let reloaded = crate::app::services::markdown::render_markdown(&md);
        for tag in ["<h1>", "<ol", "<ul>", "<blockquote>", "<pre>", "<hr"] {
            assert!(!reloaded.contains(tag), "{tag} in {reloaded}");
        }
        assert!(reloaded.contains("<p># not a heading</p>"));
        assert!(reloaded.contains("<p>1. not a list</p>"));
        assert_eq!(html_to_markdown(&reloaded), md);
    }

    #[test]
    fn test_ordinary_text_is_not_escaped() {
        assert_eq!(
            html_to_markdown("<p>-5 degrees, 2024. #1 fan</p>"),
            "-5 degrees, 2024. #1 fan\n"
        );
        assert_eq!(html_to_markdown("<p>a # b - c</p>"), "a # b - c\n");
    }

    #[test]
    fn test_round_trip_through_commonmark() {
        let md = "# Title\n\nSome *text*\n\n---\n\n- a\n- b\n";
        let html = crate::app::services::markdown::render_markdown(md);
        assert_eq!(html_to_markdown(&html), md);
    }
}
