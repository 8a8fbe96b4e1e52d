//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Tab management (Home tab plus open documents)
//! - Markdown preview

pub mod preview;
pub mod tabs;
