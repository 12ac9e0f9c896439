//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Document state and print settings
//! - Page segments and rendered pages
//! - The editor surface contract
//! - Application settings

pub mod document;
pub mod editor;
pub mod page;
pub mod print_settings;
pub mod settings;

pub use document::{DEFAULT_FILE_NAME, DocumentState, FileData};
pub use editor::{BlockInfo, BlockKind, EditorSurface, NativeMarkdown};
pub use page::{HeaderFooterRow, PageSegment, RenderedPage};
pub use print_settings::PrintSettings;
pub use settings::{AppSettings, PageSize};
