//! Docsight Core
//!
//! Core types shared by the Docsight client, watcher and CLI.
//!
//! This crate contains:
//! - Domain types: Jobs, job results and documents
//! - DTOs: Wire shapes exchanged with the analysis backend

pub mod domain;
pub mod dto;
