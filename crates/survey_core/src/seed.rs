//! Sample projects used to pre-populate a fresh store.

use crate::geo::coordinate::Coordinate;
use crate::model::artifact::{Artifact, NewArtifact};
use crate::model::project::{NewProject, Project, ProjectStatus, SiteType};
use crate::repo::project_repo::{InMemoryProjectRepository, StoreResult};
use chrono::NaiveDate;
use uuid::Uuid;

struct SeedProject {
    name: &'static str,
    description: &'static str,
    location: &'static str,
    status: ProjectStatus,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    position: (f64, f64),
    boundary: [(f64, f64); 4],
}

const SEED_PROJECTS: [SeedProject; 3] = [
    SeedProject {
        name: "Site A Excavation",
        description: "Archaeological excavation of prehistoric Native American settlement",
        location: "Arizona",
        status: ProjectStatus::InProgress,
        start: (2024, 2, 15),
        end: (2024, 6, 15),
        position: (34.0489, -111.0937),
        boundary: [
            (34.0489, -111.0937),
            (34.05, -111.0937),
            (34.05, -111.095),
            (34.0489, -111.095),
        ],
    },
    SeedProject {
        name: "Site B Excavation",
        description: "Survey of potential colonial-era trading post locations.",
        location: "New Mexico",
        status: ProjectStatus::Completed,
        start: (2024, 1, 10),
        end: (2024, 3, 10),
        position: (34.5199, -105.8701),
        boundary: [
            (34.5199, -105.8701),
            (34.52, -105.8701),
            (34.52, -105.872),
            (34.5199, -105.872),
        ],
    },
    SeedProject {
        name: "Canyon Ridge Analysis",
        description: "Analysis of rock art and settlement patterns in canyon system.",
        location: "Utah",
        status: ProjectStatus::Planning,
        start: (2024, 4, 1),
        end: (2024, 6, 15),
        position: (37.1231, -113.1013),
        boundary: [
            (37.1231, -113.1013),
            (37.125, -113.1013),
            (37.125, -113.103),
            (37.1231, -113.103),
        ],
    },
];

/// Builds the sample projects with fresh ids.
///
/// Each project carries one recorded artifact.
pub fn sample_projects() -> Vec<Project> {
    SEED_PROJECTS.iter().map(build_project).collect()
}

/// Creates a store holding `sample_projects()`.
pub fn sample_repository() -> StoreResult<InMemoryProjectRepository> {
    InMemoryProjectRepository::from_projects(sample_projects())
}

fn build_project(seed: &SeedProject) -> Project {
    let mut draft = NewProject::new(
        seed.name,
        seed.description,
        date(seed.start),
        coordinate(seed.position),
    );
    draft.location = seed.location.to_string();
    draft.expected_end_date = Some(date(seed.end));
    draft.site_type = Some(SiteType::Settlement);
    draft.boundary = seed.boundary.iter().copied().map(coordinate).collect();

    let mut project = Project::new(Uuid::new_v4(), draft);
    project.status = seed.status;
    project
        .artifacts
        .push(Artifact::new(Uuid::new_v4(), ceramic_vessel()));
    project
}

fn ceramic_vessel() -> NewArtifact {
    NewArtifact {
        name: "Ceramic Vessel".to_string(),
        kind: "Pottery".to_string(),
        material: "Clay".to_string(),
        condition: "Fragmentary".to_string(),
        dimensions: "15cm x 10cm".to_string(),
        date_found: "2024-03-01".to_string(),
        description: "Partial vessel with geometric designs".to_string(),
        location: "Grid A3".to_string(),
    }
}

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn coordinate((lat, lng): (f64, f64)) -> Coordinate {
    Coordinate::new(lat, lng).expect("valid seed coordinate")
}
