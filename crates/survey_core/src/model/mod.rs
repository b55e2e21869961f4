//! Domain model for survey projects and their artifacts.
//!
//! # Responsibility
//! - Define typed records shared by the store, services and callers.
//! - Separate store-owned records from caller-supplied drafts and patches.
//!
//! # Invariants
//! - Projects own their artifacts; no artifact exists outside a project.
//! - Identity fields are assigned by the store and are not patchable.

pub mod artifact;
pub mod project;
