//! Domain types
//!
//! Shared structures used by every Docsight component.

pub mod document;
pub mod job;
