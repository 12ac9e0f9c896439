//! Page numbering under the "exclude first page" policy.
//!
//! With the policy on, segment 0 is an unnumbered cover: it shows no
//! header or footer, and the first printed number is 1 on segment 1.

pub fn page_number(segment_index: usize, exclude_first_page: bool) -> usize {
    if exclude_first_page {
        segment_index
    } else {
        segment_index + 1
    }
}

/// Pages that count toward `{pages}`.
pub fn printable_page_count(segment_count: usize, exclude_first_page: bool) -> usize {
    if exclude_first_page {
        segment_count.saturating_sub(1)
    } else {
        segment_count
    }
}

/// Whether the segment gets a header and footer at all.
pub fn shows_chrome(segment_index: usize, exclude_first_page: bool) -> bool {
    !(exclude_first_page && segment_index == 0)
}
