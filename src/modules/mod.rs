//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the external REST backend and the document writer.

pub mod backend;
pub mod document;
