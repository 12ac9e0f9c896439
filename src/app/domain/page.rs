use crate::app::services::text_ops::escape_html;

/// Serialized content between two consecutive page breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSegment {
    /// Zero-based position in the document.
    pub index: usize,
    pub markup: String,
}

impl PageSegment {
    pub fn is_empty(&self) -> bool {
        self.markup.trim().is_empty()
    }
}

/// Three substituted cells of a header or footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFooterRow {
    pub left: String,
    pub center: String,
    pub right: String,
}

impl HeaderFooterRow {
    pub fn is_blank(&self) -> bool {
        self.left.is_empty() && self.center.is_empty() && self.right.is_empty()
    }

    /// Cells as `<div>` blocks; cell text is escaped, not interpreted as markup.
    pub fn to_html(&self) -> String {
        format!(
            "<div>{}</div><div>{}</div><div>{}</div>",
            escape_html(&self.left),
            escape_html(&self.center),
            escape_html(&self.right)
        )
    }
}

/// A page ready for the print surface.
///
/// `header` and `footer` are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub segment: PageSegment,
    pub page_number: usize,
    pub header: Option<HeaderFooterRow>,
    pub footer: Option<HeaderFooterRow>,
}

impl RenderedPage {
    pub fn has_chrome(&self) -> bool {
        self.header.is_some()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"print-page\">");
        if let Some(header) = &self.header {
            html.push_str("<div class=\"print-header\">");
            html.push_str(&header.to_html());
            html.push_str("</div>");
        }
        html.push_str("<div class=\"print-page-body tiptap-content\">");
        html.push_str(&self.segment.markup);
        html.push_str("</div>");
        if let Some(footer) = &self.footer {
            html.push_str("<div class=\"print-footer\">");
            html.push_str(&footer.to_html());
            html.push_str("</div>");
        }
        html.push_str("</div>");
        html
    }
}
