use async_trait::async_trait;
use log::debug;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::ResolvedDatabase;
use crate::errors::{FintermsError, FintermsResult};

/// The seam between the bootstrap logic and the container engine.
/// Production shells out to Docker Compose; tests script this trait and
/// record which operations were issued.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Whether the database container is currently running
    async fn is_running(&self) -> FintermsResult<bool>;

    /// Start the database container
    async fn start(&self) -> FintermsResult<()>;

    /// Whether the database accepts connections
    async fn is_ready(&self) -> FintermsResult<bool>;

    /// Stream the dump file into the database client, once, unmodified
    async fn load_dump(&self, dump_file: &Path) -> FintermsResult<()>;

    /// Run SQL inside the container and return the client's stdout
    async fn run_sql(&self, sql: &str) -> FintermsResult<String>;
}

/// Docker Compose backed runtime: `docker compose` for container lifecycle,
/// `pg_isready` for the readiness probe, `psql` for SQL and dump loading
pub struct DockerComposeRuntime {
    db: ResolvedDatabase,
}

impl DockerComposeRuntime {
    pub fn new(db: ResolvedDatabase) -> Self {
        Self { db }
    }

    fn compose(&self) -> Command {
        let mut cmd = Command::new("docker");
        cmd.arg("compose").current_dir(&self.db.project_dir);
        cmd
    }

    async fn run(operation: &str, cmd: &mut Command) -> FintermsResult<std::process::Output> {
        debug!("Running container operation: {}", operation);
        let output = cmd
            .output()
            .await
            .map_err(|e| FintermsError::Container {
                operation: operation.to_string(),
                message: e.to_string(),
            })?;
        Ok(output)
    }

    fn require_success(
        operation: &str,
        output: &std::process::Output,
    ) -> FintermsResult<()> {
        if output.status.success() {
            return Ok(());
        }
        Err(FintermsError::Container {
            operation: operation.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[async_trait]
impl ContainerRuntime for DockerComposeRuntime {
    async fn is_running(&self) -> FintermsResult<bool> {
        let mut cmd = self.compose();
        cmd.args(["ps", "--status", "running", "--services"]);
        let output = Self::run("status check", &mut cmd).await?;
        Self::require_success("status check", &output)?;

        let running = String::from_utf8_lossy(&output.stdout)
            .lines()
            .any(|line| line.trim() == self.db.service);
        Ok(running)
    }

    async fn start(&self) -> FintermsResult<()> {
        let mut cmd = self.compose();
        cmd.args(["up", "-d", &self.db.service]);
        let output = Self::run("container start", &mut cmd).await?;
        Self::require_success("container start", &output)
    }

    async fn is_ready(&self) -> FintermsResult<bool> {
        let mut cmd = self.compose();
        cmd.args([
            "exec",
            "-T",
            &self.db.service,
            "pg_isready",
            "-U",
            &self.db.user,
            "-d",
            &self.db.name,
        ]);
        // pg_isready signals "not yet" through its exit code
        let output = Self::run("readiness probe", &mut cmd).await?;
        Ok(output.status.success())
    }

    async fn load_dump(&self, dump_file: &Path) -> FintermsResult<()> {
        let file = std::fs::File::open(dump_file)?;

        let mut cmd = self.compose();
        cmd.args([
            "exec",
            "-T",
            &self.db.service,
            "psql",
            "-v",
            "ON_ERROR_STOP=1",
            "-U",
            &self.db.user,
            "-d",
            &self.db.name,
        ])
        .stdin(Stdio::from(file))
        .stdout(Stdio::null());

        let output = Self::run("dump load", &mut cmd).await?;
        Self::require_success("dump load", &output)
    }

    async fn run_sql(&self, sql: &str) -> FintermsResult<String> {
        let mut cmd = self.compose();
        cmd.args([
            "exec",
            "-T",
            &self.db.service,
            "psql",
            "-v",
            "ON_ERROR_STOP=1",
            "-tA",
            "-U",
            &self.db.user,
            "-d",
            &self.db.name,
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| FintermsError::Container {
            operation: "sql execution".to_string(),
            message: e.to_string(),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(sql.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| FintermsError::Container {
                operation: "sql execution".to_string(),
                message: e.to_string(),
            })?;
        Self::require_success("sql execution", &output)?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
