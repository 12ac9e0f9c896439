//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the host platform:
//! - Document lifecycle (new, open, save, unsaved-changes prompt)
//! - Print composition

pub mod document;
pub mod print;
