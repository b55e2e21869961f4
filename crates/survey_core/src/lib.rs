//! Core domain logic for archaeological survey projects.
//! This crate is the single source of truth for project/artifact invariants.

pub mod config;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use geo::boundary::{
    add_point, is_polygon, push_point, remove_point, BoundaryEditor, BoundaryShape,
    MIN_POLYGON_POINTS,
};
pub use geo::coordinate::{
    parse_coordinate_pair, validate_coordinate, Axis, Coordinate, CoordinateError,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::artifact::{Artifact, ArtifactId, ArtifactPatch, NewArtifact};
pub use model::project::{
    CulturalPeriod, NewProject, Project, ProjectId, ProjectPatch, ProjectStatus, SiteType,
};
pub use repo::project_repo::{
    InMemoryProjectRepository, ProjectListQuery, ProjectRepository, ProjectSnapshot,
    ProjectStats, SnapshotListener, StoreError, StoreResult, SubscriptionId,
};
pub use service::project_form::{FormStep, ProjectForm, ProjectFormError};
pub use service::project_service::ProjectService;

/// Builds the service a fresh process starts with.
///
/// Seeds sample projects when `config.seed_sample_data` is set.
pub fn bootstrap_service(
    config: &CoreConfig,
) -> StoreResult<ProjectService<InMemoryProjectRepository>> {
    let repo = if config.seed_sample_data {
        seed::sample_repository()?
    } else {
        InMemoryProjectRepository::new()
    };
    Ok(ProjectService::new(repo))
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
