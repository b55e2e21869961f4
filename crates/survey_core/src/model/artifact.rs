//! Artifact domain model.
//!
//! Artifacts are owned by exactly one project and never outlive it. All
//! descriptive fields are free text without cross-field invariants.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an artifact, unique within its owning project.
pub type ArtifactId = Uuid;

/// Recovered item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: ArtifactId,
    pub name: String,
    /// Serialized as `type`, e.g. `Pottery`, `Lithic`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub date_found: String,
    #[serde(default)]
    pub description: String,
    /// Grid reference inside the site, e.g. `Grid A3`.
    #[serde(default)]
    pub location: String,
}

impl Artifact {
    pub fn new(id: ArtifactId, draft: NewArtifact) -> Self {
        Self {
            id,
            name: draft.name,
            kind: draft.kind,
            material: draft.material,
            condition: draft.condition,
            dimensions: draft.dimensions,
            date_found: draft.date_found,
            description: draft.description,
            location: draft.location,
        }
    }

    /// Merges the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: &ArtifactPatch) {
        let fields = [
            (&mut self.name, &patch.name),
            (&mut self.kind, &patch.kind),
            (&mut self.material, &patch.material),
            (&mut self.condition, &patch.condition),
            (&mut self.dimensions, &patch.dimensions),
            (&mut self.date_found, &patch.date_found),
            (&mut self.description, &patch.description),
            (&mut self.location, &patch.location),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
    }
}

/// Creation input for an artifact. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArtifact {
    pub name: String,
    pub kind: String,
    pub material: String,
    pub condition: String,
    pub dimensions: String,
    pub date_found: String,
    pub description: String,
    pub location: String,
}

impl NewArtifact {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an artifact; `id` is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub material: Option<String>,
    pub condition: Option<String>,
    pub dimensions: Option<String>,
    pub date_found: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl ArtifactPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
