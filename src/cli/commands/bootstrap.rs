use anyhow::{anyhow, Result};
use std::path::PathBuf;

use crate::cli::ui;
use finterms::config::AppConfig;
use finterms::db::bootstrap::{bootstrap, BootstrapOptions};
use finterms::db::runtime::DockerComposeRuntime;

/// Bootstrap command: start the database container and load the SQL dump
pub async fn execute(
    config: &AppConfig,
    project_dir: Option<PathBuf>,
    dump_file: Option<PathBuf>,
    max_attempts: Option<u32>,
    yes: bool,
) -> Result<()> {
    let db = config.database()?;

    let project_dir = project_dir.unwrap_or_else(|| db.project_dir.clone());
    let dump_file = dump_file
        .or_else(|| db.dump_file.clone())
        .ok_or_else(|| anyhow!("no dump file given; pass --dump-file or set DUMP_FILE"))?;

    ui::print_header("Database Bootstrap");
    // the password is deliberately absent from this banner
    ui::print_result(
        "Database",
        &format!("{}@{}:{}/{}", db.user, db.host, db.port, db.name),
    );
    ui::print_result("Compose project", &project_dir.display().to_string());
    ui::print_result("Dump file", &dump_file.display().to_string());

    if !yes {
        let proceed = ui::confirm_action("Load the dump into this database?")?;
        if !proceed {
            ui::print_info("Bootstrap cancelled");
            return Ok(());
        }
    }

    let options = BootstrapOptions {
        max_ready_attempts: max_attempts.unwrap_or(db.max_ready_attempts),
        ..BootstrapOptions::default()
    };
    let runtime = DockerComposeRuntime::new(db);

    let spinner = ui::spinner_with_message("Bringing up the database...");
    let report = bootstrap(&runtime, &project_dir, &dump_file, &options).await;
    spinner.finish_and_clear();

    let report = report?;
    if report.container_started {
        ui::print_info("Container started");
    } else {
        ui::print_info("Container was already running");
    }
    ui::print_info(&format!(
        "Database ready after {} probe(s)",
        report.ready_after_attempts
    ));
    ui::print_success("Dump loaded successfully");

    Ok(())
}
