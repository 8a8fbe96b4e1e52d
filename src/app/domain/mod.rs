//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Document and DocumentId
//! - Table of contents
//! - Notebooks and the recent-notebook list
//! - Application settings
//! - Message types for the event system

pub mod document;
pub mod messages;
pub mod notebook;
pub mod recent;
pub mod settings;
pub mod toc;

pub use document::{Document, DocumentId};
pub use messages::Message;
pub use recent::RecentList;
pub use settings::AppSettings;
pub use toc::{Heading, TocTree};
