use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use survey_core::{
    ArtifactPatch, Coordinate, InMemoryProjectRepository, NewArtifact, NewProject,
    ProjectListQuery, ProjectPatch, ProjectRepository, ProjectService, ProjectSnapshot,
    ProjectStatus, SiteType, StoreError,
};
use uuid::Uuid;

fn service() -> ProjectService<InMemoryProjectRepository> {
    ProjectService::new(InMemoryProjectRepository::new())
}

fn draft(name: &str) -> NewProject {
    NewProject::new(
        name,
        "d",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        Coordinate::new(34.0489, -111.0937).unwrap(),
    )
}

fn axe() -> NewArtifact {
    NewArtifact {
        name: "Axe".to_string(),
        kind: "Lithic".to_string(),
        date_found: "2024-02-01".to_string(),
        location: "B2".to_string(),
        ..NewArtifact::default()
    }
}

#[test]
fn create_add_artifact_delete_scenario() {
    let mut service = service();

    let id = service.add_project(draft("Test Site"));
    let project = service.get_project(id).unwrap();
    assert_eq!(project.id, id);
    assert_eq!(project.name, "Test Site");
    assert_eq!(project.status, ProjectStatus::Planning);
    assert!(project.artifacts.is_empty());

    let artifact_id = service.add_artifact(id, axe()).unwrap();
    let project = service.get_project(id).unwrap();
    assert_eq!(project.artifacts.len(), 1);
    let artifact = project.artifact(artifact_id).unwrap();
    assert_eq!(artifact.name, "Axe");
    assert_eq!(artifact.kind, "Lithic");
    assert_eq!(artifact.date_found, "2024-02-01");
    assert_eq!(artifact.location, "B2");

    service.delete_project(id).unwrap();
    assert!(service.get_project(id).is_none());
}

#[test]
fn update_project_changes_only_named_field() {
    let mut service = service();
    let target = service.add_project(draft("Target"));
    let mut other_draft = draft("Other");
    other_draft.site_type = Some(SiteType::Burial);
    let other = service.add_project(other_draft);

    let target_before = service.get_project(target).unwrap();
    let other_before = service.get_project(other).unwrap();

    service
        .update_project(
            target,
            &ProjectPatch {
                name: Some("X".to_string()),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    let target_after = service.get_project(target).unwrap();
    let mut expected = (*target_before).clone();
    expected.name = "X".to_string();
    assert_eq!(*target_after, expected);
    assert_eq!(*service.get_project(other).unwrap(), *other_before);
}

#[test]
fn update_project_can_move_status_forward() {
    let mut service = service();
    let id = service.add_project(draft("Site"));
    service
        .update_project(
            id,
            &ProjectPatch {
                status: Some(ProjectStatus::InProgress),
                ..ProjectPatch::default()
            },
        )
        .unwrap();
    assert_eq!(
        service.get_project(id).unwrap().status,
        ProjectStatus::InProgress
    );
}

#[test]
fn delete_project_cascades_to_artifacts() {
    let mut service = service();
    let id = service.add_project(draft("Site"));
    let artifact_id = service.add_artifact(id, axe()).unwrap();
    service.add_artifact(id, axe()).unwrap();
    assert_eq!(service.stats().total_artifacts, 2);

    service.delete_project(id).unwrap();

    assert_eq!(service.stats().total_artifacts, 0);
    assert_eq!(
        service.update_artifact(id, artifact_id, &ArtifactPatch::default()),
        Err(StoreError::ProjectNotFound(id))
    );
}

#[test]
fn artifact_ids_are_unique_among_siblings() {
    let mut service = service();
    let id = service.add_project(draft("Site"));

    let mut seen = HashSet::new();
    for expected_len in 1..=5 {
        let artifact_id = service.add_artifact(id, axe()).unwrap();
        assert!(seen.insert(artifact_id));
        assert_eq!(service.get_project(id).unwrap().artifacts.len(), expected_len);
    }
}

#[test]
fn artifact_operations_are_scoped_to_their_project() {
    let mut service = service();
    let first = service.add_project(draft("First"));
    let second = service.add_project(draft("Second"));
    let artifact_id = service.add_artifact(first, axe()).unwrap();
    let kept = service.add_artifact(first, axe()).unwrap();

    let err = service.delete_artifact(second, artifact_id).unwrap_err();
    assert_eq!(
        err,
        StoreError::ArtifactNotFound {
            project_id: second,
            artifact_id,
        }
    );
    assert_eq!(service.get_project(first).unwrap().artifacts.len(), 2);

    service
        .update_artifact(
            first,
            artifact_id,
            &ArtifactPatch {
                condition: Some("Complete".to_string()),
                ..ArtifactPatch::default()
            },
        )
        .unwrap();
    service.delete_artifact(first, kept).unwrap();

    let project = service.get_project(first).unwrap();
    assert_eq!(project.artifacts.len(), 1);
    assert_eq!(project.artifacts[0].id, artifact_id);
    assert_eq!(project.artifacts[0].condition, "Complete");
    assert_eq!(project.artifacts[0].name, "Axe");
}

#[test]
fn unknown_ids_leave_store_untouched() {
    let mut service = service();
    let id = service.add_project(draft("Site"));
    let before = service.snapshot();
    let missing = Uuid::new_v4();

    assert_eq!(
        service.update_project(missing, &ProjectPatch::default()),
        Err(StoreError::ProjectNotFound(missing))
    );
    assert_eq!(
        service.delete_project(missing),
        Err(StoreError::ProjectNotFound(missing))
    );
    assert_eq!(
        service.add_artifact(missing, axe()),
        Err(StoreError::ProjectNotFound(missing))
    );
    assert!(matches!(
        service.update_artifact(id, missing, &ArtifactPatch::default()),
        Err(StoreError::ArtifactNotFound { .. })
    ));
    assert!(service.get_project(missing).is_none());

    let after = service.snapshot();
    assert_eq!(after.version(), before.version());
    assert!(after.same_as(&before));
}

#[test]
fn snapshots_are_immutable_and_versioned() {
    let mut service = service();
    let empty = service.snapshot();
    let id = service.add_project(draft("Site"));
    let one = service.snapshot();
    service.add_artifact(id, axe()).unwrap();
    let two = service.snapshot();

    assert!(empty.is_empty());
    assert_eq!(one.len(), 1);
    assert!(one.get(id).unwrap().artifacts.is_empty());
    assert_eq!(two.get(id).unwrap().artifacts.len(), 1);
    assert!(empty.version() < one.version());
    assert!(one.version() < two.version());
    assert!(!one.same_as(&two));
}

#[test]
fn listeners_receive_each_published_snapshot() {
    let mut service = service();
    let versions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&versions);
    let handle = service.subscribe(Box::new(move |snapshot: &ProjectSnapshot| {
        sink.borrow_mut().push((snapshot.version(), snapshot.len()));
    }));

    let id = service.add_project(draft("Site"));
    service.add_artifact(id, axe()).unwrap();
    let _ = service.delete_project(Uuid::new_v4());
    assert!(service.unsubscribe(handle));
    service.delete_project(id).unwrap();

    assert_eq!(*versions.borrow(), vec![(1, 1), (2, 1)]);
}

#[test]
fn find_project_accepts_textual_ids() {
    let mut service = service();
    let id = service.add_project(draft("Site"));

    assert_eq!(service.find_project(&id.to_string()).unwrap().id, id);
    assert!(service.find_project("1").is_none());
    assert!(service.find_project(&Uuid::new_v4().to_string()).is_none());
}

#[test]
fn list_projects_filters_by_name_and_status() {
    let mut service = service();
    let alpha = service.add_project(draft("Site Alpha"));
    service.add_project(draft("Canyon Ridge"));
    let mut beta_draft = draft("site beta");
    beta_draft.site_type = Some(SiteType::RockArt);
    let beta = service.add_project(beta_draft);
    service
        .update_project(
            beta,
            &ProjectPatch {
                status: Some(ProjectStatus::Completed),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    let by_name = service.list_projects(&ProjectListQuery {
        name_contains: Some("SITE".to_string()),
        ..ProjectListQuery::default()
    });
    let ids: Vec<_> = by_name.iter().map(|project| project.id).collect();
    assert_eq!(ids, vec![alpha, beta]);

    let completed = service.list_projects(&ProjectListQuery {
        name_contains: Some("site".to_string()),
        status: Some(ProjectStatus::Completed),
        ..ProjectListQuery::default()
    });
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, beta);

    let rock_art = service.list_projects(&ProjectListQuery {
        site_type: Some(SiteType::RockArt),
        ..ProjectListQuery::default()
    });
    let ids: Vec<_> = rock_art.iter().map(|project| project.id).collect();
    assert_eq!(ids, vec![beta]);

    let none = service.list_projects(&ProjectListQuery {
        name_contains: Some("alpha".to_string()),
        site_type: Some(SiteType::RockArt),
        ..ProjectListQuery::default()
    });
    assert!(none.is_empty());

    let paged = service.list_projects(&ProjectListQuery {
        offset: 1,
        limit: Some(1),
        ..ProjectListQuery::default()
    });
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].name, "Canyon Ridge");
}

#[test]
fn stats_count_statuses_and_artifacts() {
    let mut service = service();
    let a = service.add_project(draft("A"));
    let b = service.add_project(draft("B"));
    service.add_artifact(a, axe()).unwrap();
    service.add_artifact(b, axe()).unwrap();
    service.add_artifact(b, axe()).unwrap();
    service
        .update_project(
            b,
            &ProjectPatch {
                status: Some(ProjectStatus::InProgress),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    let stats = service.stats();
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.count_for(ProjectStatus::Planning), 1);
    assert_eq!(stats.count_for(ProjectStatus::InProgress), 1);
    assert_eq!(stats.count_for(ProjectStatus::Completed), 0);
    assert_eq!(stats.total_artifacts, 3);
}

fn found_on(name: &str, date_found: &str) -> NewArtifact {
    NewArtifact {
        date_found: date_found.to_string(),
        ..NewArtifact::new(name, "Pottery")
    }
}

#[test]
fn recent_artifacts_are_newest_first_with_owner() {
    let mut service = service();
    let site_a = service.add_project(draft("Site A"));
    let site_b = service.add_project(draft("Site B"));
    service.add_artifact(site_a, found_on("Sherd", "2024-03-01")).unwrap();
    service.add_artifact(site_a, found_on("Bead", "sometime in spring")).unwrap();
    service.add_artifact(site_b, found_on("Point", "2024-03-15")).unwrap();
    service.add_artifact(site_b, found_on("Scraper", "")).unwrap();
    service.add_artifact(site_a, found_on("Vessel", "2024-03-14")).unwrap();

    let recent = service.recent_artifacts(10);
    let rows: Vec<_> = recent
        .iter()
        .map(|(project, artifact)| (project.name.as_str(), artifact.name.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Site B", "Point"),
            ("Site A", "Vessel"),
            ("Site A", "Sherd"),
            ("Site A", "Bead"),
            ("Site B", "Scraper"),
        ]
    );

    let top = service.recent_artifacts(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].0.id, site_b);
    assert_eq!(top[1].1.name, "Vessel");
    assert!(service.recent_artifacts(0).is_empty());
}

#[test]
fn recent_projects_follow_start_date() {
    let mut service = service();
    let mut early = draft("Early");
    early.start_date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    let mut late = draft("Late");
    late.start_date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    service.add_project(early);
    service.add_project(late);
    service.add_project(draft("Middle"));

    let names: Vec<_> = service
        .recent_projects(2)
        .iter()
        .map(|project| project.name.clone())
        .collect();
    assert_eq!(names, vec!["Late", "Middle"]);
}

#[test]
fn repository_can_be_used_without_service() {
    let mut repo = InMemoryProjectRepository::new();
    let id = repo.create_project(draft("Direct"));
    assert_eq!(repo.get_project(id).unwrap().name, "Direct");
    assert_eq!(repo.list_projects(&ProjectListQuery::default()).len(), 1);
}
