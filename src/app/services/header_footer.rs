use super::tokens::substitute;
use crate::app::domain::page::HeaderFooterRow;

/// Build a header or footer row, substituting each cell on its own.
pub fn build_row(
    left: &str,
    center: &str,
    right: &str,
    page_num: usize,
    total_pages: usize,
) -> HeaderFooterRow {
    HeaderFooterRow {
        left: substitute(Some(left), page_num, total_pages),
        center: substitute(Some(center), page_num, total_pages),
        right: substitute(Some(right), page_num, total_pages),
    }
}

/// [`build_row`] over a `[left, center, right]` template triple.
pub fn build_row_from(cells: [&str; 3], page_num: usize, total_pages: usize) -> HeaderFooterRow {
    let [left, center, right] = cells;
    build_row(left, center, right, page_num, total_pages)
}
