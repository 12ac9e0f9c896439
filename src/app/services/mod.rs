//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Pagination (page splitting, numbering, header/footer tokens)
//! - Front matter persistence
//! - Markdown conversion chain
//! - Cover page and clipboard helpers

pub mod clipboard;
pub mod cover;
pub mod front_matter;
pub mod header_footer;
pub mod markdown;
pub mod page_numbers;
pub mod page_split;
pub mod text_ops;
pub mod tokens;
