//! Services layer - stateless text operations.
//!
//! - Path and line helpers
//! - Markdown component insertion

pub mod snippets;
pub mod text_ops;
