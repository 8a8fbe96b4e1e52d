//! Infrastructure layer - external integrations and utilities.
//!
//! - FLTK buffer access
//! - Error types

pub mod buffer;
pub mod error;
