//! Project store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Own all project and artifact state behind one repository contract.
//! - Publish an immutable, versioned snapshot after every applied mutation.
//!
//! # Invariants
//! - Project ids and artifact ids are never reused, even after deletion.
//! - Unmatched ids leave state untouched and publish nothing.
//! - Unchanged projects keep their `Arc` identity across snapshots.
//! - Deleting a project drops its artifacts with it.

use crate::model::artifact::{Artifact, ArtifactId, ArtifactPatch, NewArtifact};
use crate::model::project::{NewProject, Project, ProjectId, ProjectPatch, ProjectStatus, SiteType};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error. Every variant leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    ProjectNotFound(ProjectId),
    ArtifactNotFound {
        project_id: ProjectId,
        artifact_id: ArtifactId,
    },
    /// Initial records reuse an id.
    DuplicateId(Uuid),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ArtifactNotFound {
                project_id,
                artifact_id,
            } => write!(
                f,
                "artifact not found: {artifact_id} (project {project_id})"
            ),
            Self::DuplicateId(id) => write!(f, "duplicate record id: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Query options for listing projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectListQuery {
    /// Case-insensitive substring match against the project name.
    pub name_contains: Option<String>,
    pub status: Option<ProjectStatus>,
    pub site_type: Option<SiteType>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ProjectListQuery {
    fn matches(&self, project: &Project, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            if !project.name.to_lowercase().contains(needle) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(site_type) = self.site_type {
            if project.site_type != Some(site_type) {
                return false;
            }
        }
        true
    }
}

/// Aggregate counts for an overview screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub total_projects: usize,
    pub planning: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total_artifacts: usize,
}

impl ProjectStats {
    pub fn count_for(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::Planning => self.planning,
            ProjectStatus::InProgress => self.in_progress,
            ProjectStatus::Completed => self.completed,
        }
    }
}

/// Immutable view of every project at one store version.
///
/// Cloning is cheap; holders never observe later mutations.
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    version: u64,
    projects: Arc<Vec<Arc<Project>>>,
}

impl ProjectSnapshot {
    /// Monotonic version; bumps once per applied mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Projects in insertion order.
    pub fn projects(&self) -> &[Arc<Project>] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: ProjectId) -> Option<&Arc<Project>> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Whether both snapshots share the same project list allocation.
    pub fn same_as(&self, other: &ProjectSnapshot) -> bool {
        Arc::ptr_eq(&self.projects, &other.projects)
    }

    /// Filters projects in insertion order, then applies offset/limit.
    pub fn query(&self, query: &ProjectListQuery) -> Vec<Arc<Project>> {
        let needle = query
            .name_contains
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);

        self.projects
            .iter()
            .filter(|project| query.matches(project, needle.as_deref()))
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> ProjectStats {
        let mut stats = ProjectStats {
            total_projects: self.projects.len(),
            ..ProjectStats::default()
        };
        for project in self.projects.iter() {
            match project.status {
                ProjectStatus::Planning => stats.planning += 1,
                ProjectStatus::InProgress => stats.in_progress += 1,
                ProjectStatus::Completed => stats.completed += 1,
            }
            stats.total_artifacts += project.artifacts.len();
        }
        stats
    }

    /// Most recently started projects first; ties keep insertion order.
    pub fn recent_projects(&self, limit: usize) -> Vec<Arc<Project>> {
        let mut projects: Vec<Arc<Project>> = self.projects.iter().cloned().collect();
        projects.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        projects.truncate(limit);
        projects
    }

    /// Artifacts across all projects, newest `date_found` first, each paired
    /// with its owning project.
    ///
    /// Dates that are not `YYYY-MM-DD` sort after every dated artifact.
    pub fn recent_artifacts(&self, limit: usize) -> Vec<(Arc<Project>, Artifact)> {
        let mut entries: Vec<(Option<NaiveDate>, Arc<Project>, &Artifact)> = self
            .projects
            .iter()
            .flat_map(|project| {
                project.artifacts.iter().map(move |artifact| {
                    let found =
                        NaiveDate::parse_from_str(artifact.date_found.trim(), "%Y-%m-%d").ok();
                    (found, Arc::clone(project), artifact)
                })
            })
            .collect();
        // `None < Some(_)`, so reversing the comparison puts undated entries last.
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries
            .into_iter()
            .take(limit)
            .map(|(_, project, artifact)| (project, artifact.clone()))
            .collect()
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked synchronously with each newly published snapshot.
pub type SnapshotListener = Box<dyn FnMut(&ProjectSnapshot)>;

/// Repository interface for project and artifact operations.
pub trait ProjectRepository {
    /// Current snapshot.
    fn snapshot(&self) -> ProjectSnapshot;
    fn create_project(&mut self, draft: NewProject) -> ProjectId;
    fn update_project(&mut self, id: ProjectId, patch: &ProjectPatch) -> StoreResult<()>;
    fn delete_project(&mut self, id: ProjectId) -> StoreResult<()>;
    fn create_artifact(
        &mut self,
        project_id: ProjectId,
        draft: NewArtifact,
    ) -> StoreResult<ArtifactId>;
    fn update_artifact(
        &mut self,
        project_id: ProjectId,
        artifact_id: ArtifactId,
        patch: &ArtifactPatch,
    ) -> StoreResult<()>;
    fn delete_artifact(&mut self, project_id: ProjectId, artifact_id: ArtifactId)
        -> StoreResult<()>;
    fn subscribe(&mut self, listener: SnapshotListener) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    fn get_project(&self, id: ProjectId) -> Option<Arc<Project>> {
        self.snapshot().get(id).cloned()
    }

    fn list_projects(&self, query: &ProjectListQuery) -> Vec<Arc<Project>> {
        self.snapshot().query(query)
    }
}

/// Process-local project store.
#[derive(Default)]
pub struct InMemoryProjectRepository {
    snapshot: ProjectSnapshot,
    issued_ids: HashSet<Uuid>,
    listeners: Vec<(SubscriptionId, SnapshotListener)>,
    next_subscription: u64,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with existing records.
    ///
    /// # Errors
    /// - `DuplicateId` when two projects share an id, an artifact id repeats,
    ///   or an artifact id collides with a project id.
    pub fn from_projects(projects: Vec<Project>) -> StoreResult<Self> {
        let mut repo = Self::new();
        for project in &projects {
            if !repo.issued_ids.insert(project.id) {
                return Err(StoreError::DuplicateId(project.id));
            }
            for artifact in &project.artifacts {
                if !repo.issued_ids.insert(artifact.id) {
                    return Err(StoreError::DuplicateId(artifact.id));
                }
            }
        }
        info!(
            "event=store_init module=store status=ok projects={}",
            projects.len()
        );
        repo.snapshot = ProjectSnapshot {
            version: 0,
            projects: Arc::new(projects.into_iter().map(Arc::new).collect()),
        };
        Ok(repo)
    }

    fn fresh_id(&mut self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.issued_ids.insert(id) {
                return id;
            }
        }
    }

    fn position_of(&self, id: ProjectId) -> StoreResult<usize> {
        self.snapshot
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or(StoreError::ProjectNotFound(id))
    }

    /// Copy-on-write edit of one project; publishes only when `edit` succeeds.
    fn modify_project<T>(
        &mut self,
        id: ProjectId,
        edit: impl FnOnce(&mut Project) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let index = self.position_of(id)?;
        let mut project = Project::clone(&self.snapshot.projects[index]);
        let output = edit(&mut project)?;

        let mut projects = self.snapshot.projects.as_ref().clone();
        projects[index] = Arc::new(project);
        self.publish(projects);
        Ok(output)
    }

    fn publish(&mut self, projects: Vec<Arc<Project>>) {
        self.snapshot = ProjectSnapshot {
            version: self.snapshot.version + 1,
            projects: Arc::new(projects),
        };
        debug!(
            "event=snapshot_publish module=store version={} projects={} listeners={}",
            self.snapshot.version,
            self.snapshot.len(),
            self.listeners.len()
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.snapshot);
        }
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn snapshot(&self) -> ProjectSnapshot {
        self.snapshot.clone()
    }

    fn create_project(&mut self, draft: NewProject) -> ProjectId {
        let id = self.fresh_id();
        let mut projects = self.snapshot.projects.as_ref().clone();
        projects.push(Arc::new(Project::new(id, draft)));
        self.publish(projects);
        info!("event=project_create module=store status=ok project_id={id}");
        id
    }

    fn update_project(&mut self, id: ProjectId, patch: &ProjectPatch) -> StoreResult<()> {
        let result = self.modify_project(id, |project| {
            project.apply_patch(patch);
            Ok(())
        });
        log_outcome("project_update", id, &result);
        result
    }

    fn delete_project(&mut self, id: ProjectId) -> StoreResult<()> {
        let result = self.position_of(id).map(|index| {
            let mut projects = self.snapshot.projects.as_ref().clone();
            let removed = projects.remove(index);
            self.publish(projects);
            removed.artifacts.len()
        });
        match &result {
            Ok(artifacts) => info!(
                "event=project_delete module=store status=ok project_id={id} artifacts_removed={artifacts}"
            ),
            Err(_) => warn!("event=project_delete module=store status=not_found project_id={id}"),
        }
        result.map(|_| ())
    }

    fn create_artifact(
        &mut self,
        project_id: ProjectId,
        draft: NewArtifact,
    ) -> StoreResult<ArtifactId> {
        // Resolve the project first so a miss does not burn an id.
        let result = self.position_of(project_id).and_then(|_| {
            let artifact_id = self.fresh_id();
            self.modify_project(project_id, |project| {
                project.artifacts.push(Artifact::new(artifact_id, draft));
                Ok(artifact_id)
            })
        });
        log_outcome("artifact_create", project_id, &result);
        result
    }

    fn update_artifact(
        &mut self,
        project_id: ProjectId,
        artifact_id: ArtifactId,
        patch: &ArtifactPatch,
    ) -> StoreResult<()> {
        let result = self.modify_project(project_id, |project| {
            let artifact = project
                .artifacts
                .iter_mut()
                .find(|artifact| artifact.id == artifact_id)
                .ok_or(StoreError::ArtifactNotFound {
                    project_id,
                    artifact_id,
                })?;
            artifact.apply_patch(patch);
            Ok(())
        });
        log_outcome("artifact_update", project_id, &result);
        result
    }

    fn delete_artifact(
        &mut self,
        project_id: ProjectId,
        artifact_id: ArtifactId,
    ) -> StoreResult<()> {
        let result = self.modify_project(project_id, |project| {
            let index = project
                .artifacts
                .iter()
                .position(|artifact| artifact.id == artifact_id)
                .ok_or(StoreError::ArtifactNotFound {
                    project_id,
                    artifact_id,
                })?;
            project.artifacts.remove(index);
            Ok(())
        });
        log_outcome("artifact_delete", project_id, &result);
        result
    }

    fn subscribe(&mut self, listener: SnapshotListener) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

fn log_outcome<T>(event: &str, project_id: ProjectId, result: &StoreResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=store status=ok project_id={project_id}"),
        Err(err) => warn!(
            "event={event} module=store status=not_found project_id={project_id} reason={err}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryProjectRepository, ProjectRepository, ProjectSnapshot, StoreError};
    use crate::geo::coordinate::Coordinate;
    use crate::model::artifact::NewArtifact;
    use crate::model::project::{NewProject, Project, ProjectStatus};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use uuid::Uuid;

    fn draft(name: &str) -> NewProject {
        NewProject::new(
            name,
            "d",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Coordinate::new(10.0, 20.0).unwrap(),
        )
    }

    #[test]
    fn modify_keeps_identity_of_untouched_projects() {
        let mut repo = InMemoryProjectRepository::new();
        let a = repo.create_project(draft("A"));
        let b = repo.create_project(draft("B"));
        let before = repo.snapshot();

        repo.create_artifact(a, NewArtifact::new("Axe", "Lithic"))
            .unwrap();
        let after = repo.snapshot();

        assert!(Arc::ptr_eq(
            before.get(b).unwrap(),
            after.get(b).unwrap()
        ));
        assert!(!Arc::ptr_eq(
            before.get(a).unwrap(),
            after.get(a).unwrap()
        ));
        assert!(before.get(a).unwrap().artifacts.is_empty());
    }

    #[test]
    fn from_projects_rejects_duplicate_ids() {
        let id = Uuid::new_v4();
        let first = Project::new(id, draft("A"));
        let second = Project::new(id, draft("B"));

        let err = InMemoryProjectRepository::from_projects(vec![first, second])
            .err()
            .unwrap();
        assert_eq!(err, StoreError::DuplicateId(id));
    }

    #[test]
    fn seeded_ids_are_never_issued_again() {
        let id = Uuid::new_v4();
        let mut repo =
            InMemoryProjectRepository::from_projects(vec![Project::new(id, draft("A"))]).unwrap();
        repo.delete_project(id).unwrap();

        let next = repo.create_project(draft("B"));
        assert_ne!(next, id);
        assert!(repo.issued_ids.contains(&id));
        assert_eq!(
            repo.get_project(next).unwrap().status,
            ProjectStatus::Planning
        );
    }

    #[test]
    fn unsubscribe_reports_unknown_handles() {
        let mut repo = InMemoryProjectRepository::new();
        let handle = repo.subscribe(Box::new(|_: &ProjectSnapshot| {}));
        assert!(repo.unsubscribe(handle));
        assert!(!repo.unsubscribe(handle));
    }
}
