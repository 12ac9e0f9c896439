//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - HTML document trees (kuchiki)
//! - Headless editor surface
//! - File I/O and dialogs
//! - HTML print export
//! - Error types

pub mod editor;
pub mod error;
pub mod html_tree;
pub mod platform;
pub mod print_export;
