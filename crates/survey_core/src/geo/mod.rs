//! Geographic input handling for project locations and boundaries.
//!
//! # Responsibility
//! - Own coordinate validation so invalid points never reach the store.
//! - Provide the boundary working set used while drawing a survey area.

pub mod boundary;
pub mod coordinate;
