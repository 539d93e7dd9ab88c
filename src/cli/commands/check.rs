use anyhow::Result;

use crate::cli::ui;
use finterms::config::AppConfig;
use finterms::db::check::{check, DUMP_SCHEMA};
use finterms::db::runtime::DockerComposeRuntime;

/// Check command: probe the database and report what landed in it
pub async fn execute(config: &AppConfig) -> Result<()> {
    let db = config.database()?;
    let runtime = DockerComposeRuntime::new(db);

    ui::print_header("Database Check");

    let spinner = ui::spinner_with_message("Probing database...");
    let report = check(&runtime).await;
    spinner.finish_and_clear();

    let report = report?;
    ui::print_result("Server", &report.server_version);
    ui::print_result(
        "Schemas",
        &if report.schemas.is_empty() {
            "none".to_string()
        } else {
            report.schemas.join(", ")
        },
    );

    if report.dump_schema_present {
        let tables = report
            .dump_table_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ui::print_success(&format!(
            "Dump schema \"{}\" is present with {} table(s)",
            DUMP_SCHEMA, tables
        ));
    } else {
        ui::print_warning(&format!(
            "Dump schema \"{}\" is missing; run the bootstrap command first",
            DUMP_SCHEMA
        ));
    }

    Ok(())
}
