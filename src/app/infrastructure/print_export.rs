//! Print surface that writes a standalone HTML print document.
//!
//! Each rendered page becomes one block that ends with a forced page break,
//! so the system viewer's print command reproduces the pagination exactly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::controllers::print::{PrintContainer, PrintOutcome, PrintSurface};
use crate::app::domain::settings::PageSize;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::text_ops::escape_html;

pub fn print_stylesheet(page_size: PageSize) -> String {
    format!(
        "@page {{ size: {size}; margin: {margin}mm; }}
body {{ margin: 0; font-family: 'Noto Sans KR', 'Malgun Gothic', sans-serif; font-size: 11pt; line-height: 1.6; }}
.print-page {{ display: flex; flex-direction: column; min-height: 100%; break-after: page; }}
.print-page:last-child {{ break-after: auto; }}
.print-header, .print-footer {{ display: flex; justify-content: space-between; font-size: 9pt; color: #555; }}
.print-header {{ margin-bottom: 8mm; }}
.print-footer {{ margin-top: auto; padding-top: 8mm; }}
.print-header > div, .print-footer > div {{ flex: 1; }}
.print-header > div:nth-child(2), .print-footer > div:nth-child(2) {{ text-align: center; }}
.print-header > div:nth-child(3), .print-footer > div:nth-child(3) {{ text-align: right; }}
.print-page-body {{ flex: 1; }}
.print-page-body hr.page-break-node {{ display: none; }}
",
        size = page_size.css_size(),
        margin = page_size.margin_mm()
    )
}

/// Full HTML document for the pages held by `container`.
pub fn print_document(title: &str, page_size: PageSize, container: &PrintContainer) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        print_stylesheet(page_size),
        container.to_html()
    )
}

pub struct HtmlExportSurface {
    output: PathBuf,
    title: String,
    page_size: PageSize,
    open_after_export: bool,
}

impl HtmlExportSurface {
    pub fn new(output: impl Into<PathBuf>, title: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            output: output.into(),
            title: title.into(),
            page_size,
            open_after_export: false,
        }
    }

    /// Open the exported file in the system viewer once written.
    pub fn open_after_export(mut self, open: bool) -> Self {
        self.open_after_export = open;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl PrintSurface for HtmlExportSurface {
    fn print(&mut self, container: &mut PrintContainer) -> Result<PrintOutcome> {
        let html = print_document(&self.title, self.page_size, container);
        fs::write(&self.output, html)?;
        tracing::info!("Print document written to {}", self.output.display());

        if self.open_after_export {
            open::that(&self.output).map_err(|e| {
                AppError::Print(format!("cannot open {}: {}", self.output.display(), e))
            })?;
        }
        Ok(PrintOutcome::Completed)
    }
}

/// Default export path: the document path with an `.print.html` suffix.
pub fn default_output_path(document_path: &Path) -> PathBuf {
    document_path.with_extension("print.html")
}
