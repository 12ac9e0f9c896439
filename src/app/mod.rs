//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (DocumentState, PrintSettings, pages)
//! - `controllers/` - Orchestration (DocumentController, print composition)
//! - `services/` - Business operations (pagination, front matter, Markdown)
//! - `infrastructure/` - External integrations (HTML trees, platform, export, error)

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use controllers::document::{APP_NAME, DocumentController};
pub use controllers::print::{PrintContainer, PrintOutcome, PrintSurface, compose};
pub use domain::{AppSettings, DocumentState, PageSize, PrintSettings, RenderedPage};
pub use infrastructure::editor::MarkupEditor;
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::platform::{FsPlatform, Platform, UnsavedChoice};
pub use infrastructure::print_export::HtmlExportSurface;
