//! Repository layer: the project store.
//!
//! # Responsibility
//! - Define the use-case oriented store contract (`ProjectRepository`).
//! - Provide the in-memory implementation and its snapshot/listener model.
//!
//! # Invariants
//! - All project and artifact reads/writes go through a repository.
//! - Repository APIs return semantic not-found errors instead of panicking.

pub mod project_repo;
