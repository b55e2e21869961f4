//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire config, logging and a seeded store outside any UI host.
//! - Print a deterministic summary for quick local sanity checks.

use survey_core::{bootstrap_service, init_from_config, CoreConfig, ProjectListQuery};

const RECENT_LIMIT: usize = 5;

fn main() {
    if let Err(err) = run() {
        eprintln!("survey_cli: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::from_env()?;
    init_from_config(&config)?;

    let service = bootstrap_service(&config)?;
    let stats = service.stats();
    log::info!(
        "event=cli_summary module=cli status=ok projects={} artifacts={}",
        stats.total_projects,
        stats.total_artifacts
    );

    println!("survey_core version={}", survey_core::core_version());
    println!(
        "projects={} planning={} in_progress={} completed={} artifacts={}",
        stats.total_projects,
        stats.planning,
        stats.in_progress,
        stats.completed,
        stats.total_artifacts
    );
    for project in service.list_projects(&ProjectListQuery::default()) {
        println!(
            "{} | {} | {} | {} | boundary={:?}",
            project.id,
            project.name,
            project.status,
            project.position,
            project.boundary_shape()
        );
    }
    for (project, artifact) in service.recent_artifacts(RECENT_LIMIT) {
        println!(
            "recent artifact | {} | {} | {} | {}",
            artifact.name, project.name, artifact.date_found, artifact.kind
        );
    }
    Ok(())
}
