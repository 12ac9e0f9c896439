//! Native FLTK dialogs backing the document controller.

pub mod dialogs;
pub mod file_dialogs;
pub mod platform;

pub use platform::FltkPlatform;
