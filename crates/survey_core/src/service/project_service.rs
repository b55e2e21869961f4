//! Project use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for presentation callers.
//! - Delegate state ownership to a `ProjectRepository`.
//!
//! # Invariants
//! - Service APIs never bypass repository contracts.
//! - Missing ids surface as `None` or `StoreError`, never as panics.

use crate::model::artifact::{Artifact, ArtifactId, ArtifactPatch, NewArtifact};
use crate::model::project::{NewProject, Project, ProjectId, ProjectPatch};
use crate::repo::project_repo::{
    ProjectListQuery, ProjectRepository, ProjectSnapshot, ProjectStats, SnapshotListener,
    StoreResult, SubscriptionId,
};
use crate::service::project_form::{ProjectForm, ProjectFormError};
use log::info;
use std::sync::Arc;
use uuid::Uuid;

/// Use-case service wrapper around a project store.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    /// Creates a project with status `Planning` and no artifacts.
    pub fn add_project(&mut self, draft: NewProject) -> ProjectId {
        self.repo.create_project(draft)
    }

    /// Validates a completed form and commits it as a new project.
    ///
    /// The form is left untouched so the caller can reset or reuse it.
    pub fn create_from_form(&mut self, form: &ProjectForm) -> Result<ProjectId, ProjectFormError> {
        let draft = form.build()?;
        let boundary_points = draft.boundary.len();
        let id = self.repo.create_project(draft);
        info!(
            "event=project_form_submit module=service status=ok project_id={id} boundary_points={boundary_points}"
        );
        Ok(id)
    }

    /// Shallow-merges `patch` into the project; other projects are untouched.
    pub fn update_project(&mut self, id: ProjectId, patch: &ProjectPatch) -> StoreResult<()> {
        self.repo.update_project(id, patch)
    }

    /// Deletes the project together with its artifacts.
    pub fn delete_project(&mut self, id: ProjectId) -> StoreResult<()> {
        self.repo.delete_project(id)
    }

    pub fn add_artifact(
        &mut self,
        project_id: ProjectId,
        draft: NewArtifact,
    ) -> StoreResult<ArtifactId> {
        self.repo.create_artifact(project_id, draft)
    }

    pub fn update_artifact(
        &mut self,
        project_id: ProjectId,
        artifact_id: ArtifactId,
        patch: &ArtifactPatch,
    ) -> StoreResult<()> {
        self.repo.update_artifact(project_id, artifact_id, patch)
    }

    pub fn delete_artifact(
        &mut self,
        project_id: ProjectId,
        artifact_id: ArtifactId,
    ) -> StoreResult<()> {
        self.repo.delete_artifact(project_id, artifact_id)
    }

    /// Looks up one project; `None` signals not-found.
    pub fn get_project(&self, id: ProjectId) -> Option<Arc<Project>> {
        self.repo.get_project(id)
    }

    /// Looks up a project by textual id, e.g. a route parameter.
    ///
    /// Unparseable keys resolve to `None` like unknown ids.
    pub fn find_project(&self, key: &str) -> Option<Arc<Project>> {
        let id = Uuid::parse_str(key.trim()).ok()?;
        self.repo.get_project(id)
    }

    pub fn list_projects(&self, query: &ProjectListQuery) -> Vec<Arc<Project>> {
        self.repo.list_projects(query)
    }

    pub fn stats(&self) -> ProjectStats {
        self.repo.snapshot().stats()
    }

    /// Projects for an overview list, latest start date first.
    pub fn recent_projects(&self, limit: usize) -> Vec<Arc<Project>> {
        self.repo.snapshot().recent_projects(limit)
    }

    /// Artifacts for an overview list, latest find first, with their project.
    pub fn recent_artifacts(&self, limit: usize) -> Vec<(Arc<Project>, Artifact)> {
        self.repo.snapshot().recent_artifacts(limit)
    }

    pub fn snapshot(&self) -> ProjectSnapshot {
        self.repo.snapshot()
    }

    pub fn subscribe(&mut self, listener: SnapshotListener) -> SubscriptionId {
        self.repo.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.repo.unsubscribe(id)
    }
}
