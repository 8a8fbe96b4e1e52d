//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, ToC, notebooks, settings, messages)
//! - `controllers/` - Orchestration (TabManager, PreviewController)
//! - `services/` - Text operations (path helpers, Markdown snippets)
//! - `infrastructure/` - External integrations (FLTK buffers, errors)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

pub const APP_NAME: &str = "NemoMark";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const RELEASE_DATE: &str = "2023-10-01";
pub const APP_WEBSITE: &str = "https://example.com/marknote";
pub const APP_REPOSITORY: &str = "https://gitee.com/kisina/nemo-mark";
pub const APP_COMMUNITY: &str = "https://qm.qq.com/q/uOvY1UZFqo";

// Re-exports for convenient external access
pub use controllers::tabs::{TabId, TabManager};
pub use domain::{AppSettings, Document, DocumentId, Message, TocTree};
pub use infrastructure::buffer::buffer_text_no_leak;
pub use infrastructure::error::{AppError, Result};
pub use state::AppState;
