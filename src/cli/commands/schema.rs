use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::cli::ui;
use finterms::config::AppConfig;
use finterms::db::runtime::DockerComposeRuntime;
use finterms::db::schema::init_schema;
use finterms::models::schema::extraction_schema;

/// Init-schema command: apply the pricing DDL through the container runtime
pub async fn execute_init(config: &AppConfig) -> Result<()> {
    let db = config.database()?;
    let user = db.user.clone();
    let runtime = DockerComposeRuntime::new(db);

    ui::print_header("Schema Initialization");

    let spinner = ui::spinner_with_message("Creating pricing schema...");
    let result = init_schema(&runtime, &user).await;
    spinner.finish_and_clear();

    result?;
    ui::print_success("Pricing schema created");
    Ok(())
}

/// Schema command: print or save the extraction JSON schema
pub fn execute_print(output: Option<PathBuf>) -> Result<()> {
    let schema = serde_json::to_string_pretty(&extraction_schema())?;
    match output {
        Some(path) => {
            fs::write(&path, schema)?;
            ui::print_success(&format!("Schema written to {}", path.display()));
        }
        None => println!("{}", schema),
    }
    Ok(())
}
