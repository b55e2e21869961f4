//! Survey project domain model.
//!
//! # Responsibility
//! - Define the canonical project record and its creation/update inputs.
//! - Keep identity and ownership fields out of caller-supplied inputs.
//!
//! # Invariants
//! - `id` is assigned once by the store and never changes.
//! - `artifacts` is only reachable through store artifact operations.
//! - Every coordinate held by a project is range-validated (`Coordinate`).

use crate::geo::boundary::BoundaryShape;
use crate::geo::coordinate::Coordinate;
use crate::model::artifact::{Artifact, ArtifactId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Initial state for every newly created project.
    #[default]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Planning, Self::InProgress, Self::Completed];

    /// Display label, also used as the serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parses a status label case-insensitively (`in progress`, `In Progress`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "planning" => Some(Self::Planning),
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site category recorded for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteType {
    Settlement,
    Burial,
    RockArt,
    ArtifactScatter,
    Structure,
}

impl SiteType {
    pub const ALL: [SiteType; 5] = [
        Self::Settlement,
        Self::Burial,
        Self::RockArt,
        Self::ArtifactScatter,
        Self::Structure,
    ];

    /// Stable tag, matching the serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Settlement => "settlement",
            Self::Burial => "burial",
            Self::RockArt => "rock_art",
            Self::ArtifactScatter => "artifact_scatter",
            Self::Structure => "structure",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Settlement => "Settlement",
            Self::Burial => "Burial Ground",
            Self::RockArt => "Rock Art",
            Self::ArtifactScatter => "Artifact Scatter",
            Self::Structure => "Structure",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }
}

/// Cultural period a site is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CulturalPeriod {
    PaleoIndian,
    Archaic,
    Woodland,
    Mississippian,
    Historic,
}

impl CulturalPeriod {
    pub const ALL: [CulturalPeriod; 5] = [
        Self::PaleoIndian,
        Self::Archaic,
        Self::Woodland,
        Self::Mississippian,
        Self::Historic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PaleoIndian => "paleo_indian",
            Self::Archaic => "archaic",
            Self::Woodland => "woodland",
            Self::Mississippian => "mississippian",
            Self::Historic => "historic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PaleoIndian => "Paleo-Indian",
            Self::Archaic => "Archaic",
            Self::Woodland => "Woodland",
            Self::Mississippian => "Mississippian",
            Self::Historic => "Historic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == normalized)
    }
}

/// Canonical project record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    /// Free-text region name, e.g. `Arizona`.
    pub location: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub expected_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub site_type: Option<SiteType>,
    #[serde(default)]
    pub cultural_period: Option<CulturalPeriod>,
    #[serde(default)]
    pub permit_number: Option<String>,
    #[serde(default)]
    pub team_size: Option<u32>,
    /// Representative point, serialized as flat `latitude`/`longitude`.
    #[serde(flatten)]
    pub position: Coordinate,
    /// Polygon vertices in drawing order.
    #[serde(rename = "boundaryPoints", default, with = "boundary_serde")]
    pub boundary: Vec<Coordinate>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Project {
    /// Builds a fresh project from a creation draft.
    ///
    /// # Invariants
    /// - `status` starts as `Planning`.
    /// - `artifacts` starts empty.
    pub fn new(id: ProjectId, draft: NewProject) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            location: draft.location,
            status: ProjectStatus::Planning,
            start_date: draft.start_date,
            expected_end_date: draft.expected_end_date,
            site_type: draft.site_type,
            cultural_period: draft.cultural_period,
            permit_number: draft.permit_number,
            team_size: draft.team_size,
            position: draft.position,
            boundary: draft.boundary,
            artifacts: Vec::new(),
        }
    }

    /// Merges the fields present in `patch`; absent fields are untouched.
    pub fn apply_patch(&mut self, patch: &ProjectPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(location) = &patch.location {
            self.location.clone_from(location);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(expected_end_date) = patch.expected_end_date {
            self.expected_end_date = expected_end_date;
        }
        if let Some(site_type) = patch.site_type {
            self.site_type = site_type;
        }
        if let Some(cultural_period) = patch.cultural_period {
            self.cultural_period = cultural_period;
        }
        if let Some(permit_number) = &patch.permit_number {
            self.permit_number.clone_from(permit_number);
        }
        if let Some(team_size) = patch.team_size {
            self.team_size = team_size;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(boundary) = &patch.boundary {
            self.boundary.clone_from(boundary);
        }
    }

    pub fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.id == id)
    }

    pub fn boundary_shape(&self) -> BoundaryShape {
        BoundaryShape::of(&self.boundary)
    }
}

/// Creation input for a project.
///
/// Carries no `id`, `status` or `artifacts`; the store owns those.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub expected_end_date: Option<NaiveDate>,
    pub site_type: Option<SiteType>,
    pub cultural_period: Option<CulturalPeriod>,
    pub permit_number: Option<String>,
    pub team_size: Option<u32>,
    pub position: Coordinate,
    pub boundary: Vec<Coordinate>,
}

impl NewProject {
    /// Creates a draft with the required fields; optional fields start empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        position: Coordinate,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            location: String::new(),
            start_date,
            expected_end_date: None,
            site_type: None,
            cultural_period: None,
            permit_number: None,
            team_size: None,
            position,
            boundary: Vec::new(),
        }
    }
}

/// Partial update for a project.
///
/// `None` leaves the field untouched. For the optional fields
/// (`expected_end_date`, `site_type`, `cultural_period`, `permit_number`,
/// `team_size`), `Some(None)` clears the value. Identity and artifact
/// ownership are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub expected_end_date: Option<Option<NaiveDate>>,
    pub site_type: Option<Option<SiteType>>,
    pub cultural_period: Option<Option<CulturalPeriod>>,
    pub permit_number: Option<Option<String>>,
    pub team_size: Option<Option<u32>>,
    pub position: Option<Coordinate>,
    pub boundary: Option<Vec<Coordinate>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Serde helper: boundary as `[[lat, lng], ...]`.
mod boundary_serde {
    use crate::geo::coordinate::Coordinate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(points: &Vec<Coordinate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pairs: Vec<[f64; 2]> = points.iter().map(|point| point.to_pair()).collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Coordinate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs: Vec<[f64; 2]> = Deserialize::deserialize(deserializer)?;
        pairs
            .into_iter()
            .map(Coordinate::try_from)
            .collect::<Result<_, _>>()
            .map_err(serde::de::Error::custom)
    }
}
