//! Repository layer
//!
//! The backend operations job watching depends on. The trait keeps the
//! poller independent of the transport and lets tests script responses.

mod analysis;

pub use analysis::{AnalysisRepository, HttpAnalysisRepository};
