//! Data Transfer Objects
//!
//! Shapes of the JSON bodies exchanged with the analysis backend.

pub mod document;
pub mod job;
