//! Pagination and print engine for the 한글MD Markdown editor.

pub mod app;

#[cfg(feature = "native-dialogs")]
pub mod ui;
