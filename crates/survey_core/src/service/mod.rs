//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep presentation callers decoupled from store internals.

pub mod project_form;
pub mod project_service;
