use log::info;

use crate::db::runtime::ContainerRuntime;
use crate::errors::FintermsResult;

/// The schema the dump restores its data into
pub const DUMP_SCHEMA: &str = "json-master";

/// What the connectivity probe found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub server_version: String,
    pub schemas: Vec<String>,
    pub dump_schema_present: bool,
    pub dump_table_count: Option<u64>,
}

/// Probe the database through the container runtime: server version, the
/// non-system schemas, and whether the dump schema landed with its tables
pub async fn check<R: ContainerRuntime>(runtime: &R) -> FintermsResult<CheckReport> {
    info!("Checking database connectivity");

    let server_version = runtime
        .run_sql("SELECT version();")
        .await?
        .trim()
        .to_string();

    let schemas: Vec<String> = runtime
        .run_sql(
            "SELECT schema_name FROM information_schema.schemata \
             WHERE schema_name NOT IN ('pg_catalog', 'information_schema', 'pg_toast') \
             ORDER BY schema_name;",
        )
        .await?
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    let dump_schema_present = schemas.iter().any(|s| s == DUMP_SCHEMA);

    let dump_table_count = if dump_schema_present {
        let count = runtime
            .run_sql(&format!(
                "SELECT count(*) FROM information_schema.tables \
                 WHERE table_schema = '{DUMP_SCHEMA}';"
            ))
            .await?;
        count.trim().parse::<u64>().ok()
    } else {
        None
    };

    Ok(CheckReport {
        server_version,
        schemas,
        dump_schema_present,
        dump_table_count,
    })
}
