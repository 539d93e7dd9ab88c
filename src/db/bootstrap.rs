use log::info;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

use crate::db::runtime::ContainerRuntime;
use crate::errors::{FintermsError, FintermsResult};

/// Tuning for the readiness poll. The attempt limit exists so an unhealthy
/// database surfaces a timeout error instead of hanging the process.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub poll_interval: Duration,
    pub max_ready_attempts: u32,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_ready_attempts: 30,
        }
    }
}

/// What the bootstrap actually did, for the success banner and for tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub container_started: bool,
    pub ready_after_attempts: u32,
}

/// Bring up the local Postgres container and load the dump.
///
/// Both paths are validated before any container operation so a missing
/// precondition fails without side effects. The start step is skipped when
/// the container already runs; the dump streams into the client exactly
/// once.
pub async fn bootstrap<R: ContainerRuntime>(
    runtime: &R,
    project_dir: &Path,
    dump_file: &Path,
    options: &BootstrapOptions,
) -> FintermsResult<BootstrapReport> {
    if !project_dir.is_dir() {
        return Err(FintermsError::MissingPath {
            what: "project directory",
            path: project_dir.to_path_buf(),
        });
    }
    if !dump_file.is_file() {
        return Err(FintermsError::MissingPath {
            what: "dump file",
            path: dump_file.to_path_buf(),
        });
    }

    let container_started = if runtime.is_running().await? {
        info!("Database container already running, skipping start");
        false
    } else {
        info!("Starting database container");
        runtime.start().await?;
        true
    };

    let ready_after_attempts = wait_until_ready(runtime, options).await?;

    info!("Loading dump from {}", dump_file.display());
    runtime.load_dump(dump_file).await?;
    info!("Dump loaded successfully");

    Ok(BootstrapReport {
        container_started,
        ready_after_attempts,
    })
}

/// Poll the readiness probe until it succeeds or the attempt limit runs out
pub async fn wait_until_ready<R: ContainerRuntime>(
    runtime: &R,
    options: &BootstrapOptions,
) -> FintermsResult<u32> {
    let max_attempts = options.max_ready_attempts.max(1);

    for attempt in 1..=max_attempts {
        if runtime.is_ready().await? {
            info!("Database ready after {} probe(s)", attempt);
            return Ok(attempt);
        }
        if attempt < max_attempts {
            sleep(options.poll_interval).await;
        }
    }

    Err(FintermsError::ReadinessTimeout {
        attempts: max_attempts,
    })
}
