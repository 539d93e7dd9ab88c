use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::db::bootstrap::{bootstrap, wait_until_ready, BootstrapOptions};
use crate::db::runtime::ContainerRuntime;
use crate::errors::{FintermsError, FintermsResult};
use crate::tests::fixtures;

/// Scripted runtime that records every operation issued against it
struct MockRuntime {
    running: bool,
    /// Probe number at which the database reports ready; `u32::MAX` never
    ready_at_probe: u32,
    probes: AtomicU32,
    ops: Mutex<Vec<String>>,
}

impl MockRuntime {
    fn new(running: bool, ready_at_probe: u32) -> Self {
        Self {
            running,
            ready_at_probe,
            probes: AtomicU32::new(0),
            ops: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, op: &str) {
        self.ops.lock().unwrap().push(op.to_string());
    }

    fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn is_running(&self) -> FintermsResult<bool> {
        self.record("is_running");
        Ok(self.running)
    }

    async fn start(&self) -> FintermsResult<()> {
        self.record("start");
        Ok(())
    }

    async fn is_ready(&self) -> FintermsResult<bool> {
        self.record("probe");
        let probe = self.probes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(probe >= self.ready_at_probe)
    }

    async fn load_dump(&self, _dump_file: &Path) -> FintermsResult<()> {
        self.record("load");
        Ok(())
    }

    async fn run_sql(&self, _sql: &str) -> FintermsResult<String> {
        self.record("sql");
        Ok(String::new())
    }
}

fn fast_options(max_ready_attempts: u32) -> BootstrapOptions {
    BootstrapOptions {
        poll_interval: Duration::ZERO,
        max_ready_attempts,
    }
}

fn project_with_dump(label: &str) -> (PathBuf, PathBuf) {
    let dir = fixtures::scratch_dir(label);
    let dump = dir.join("dump.sql");
    std::fs::write(&dump, "SELECT 1;").unwrap();
    (dir, dump)
}

#[tokio::test]
async fn missing_project_dir_fails_before_any_container_call() {
    let (_dir, dump) = project_with_dump("no-project");
    let missing = std::env::temp_dir().join("finterms-test-does-not-exist");
    let runtime = MockRuntime::new(false, 1);

    let result = bootstrap(&runtime, &missing, &dump, &fast_options(3)).await;

    match result {
        Err(FintermsError::MissingPath { what, path }) => {
            assert_eq!(what, "project directory");
            assert_eq!(path, missing);
        }
        other => panic!("expected MissingPath, got {:?}", other.map(|_| ())),
    }
    assert!(runtime.ops().is_empty());
}

#[tokio::test]
async fn missing_dump_file_fails_before_any_container_call() {
    let dir = fixtures::scratch_dir("no-dump");
    let dump = dir.join("absent.sql");
    let runtime = MockRuntime::new(false, 1);

    let result = bootstrap(&runtime, &dir, &dump, &fast_options(3)).await;

    match result {
        Err(FintermsError::MissingPath { what, path }) => {
            assert_eq!(what, "dump file");
            assert_eq!(path, dump);
        }
        other => panic!("expected MissingPath, got {:?}", other.map(|_| ())),
    }
    assert!(runtime.ops().is_empty());
}

#[tokio::test]
async fn running_container_is_not_started_again() {
    let (dir, dump) = project_with_dump("already-running");
    let runtime = MockRuntime::new(true, 1);

    let report = bootstrap(&runtime, &dir, &dump, &fast_options(3))
        .await
        .unwrap();

    assert!(!report.container_started);
    assert_eq!(runtime.ops(), vec!["is_running", "probe", "load"]);
}

#[tokio::test]
async fn stopped_container_is_started_and_polled_until_ready() {
    let (dir, dump) = project_with_dump("start-and-poll");
    let runtime = MockRuntime::new(false, 2);

    let report = bootstrap(&runtime, &dir, &dump, &fast_options(5))
        .await
        .unwrap();

    assert!(report.container_started);
    assert_eq!(report.ready_after_attempts, 2);
    assert_eq!(
        runtime.ops(),
        vec!["is_running", "start", "probe", "probe", "load"]
    );
}

#[tokio::test]
async fn readiness_timeout_surfaces_and_skips_the_dump_load() {
    let (dir, dump) = project_with_dump("never-ready");
    let runtime = MockRuntime::new(false, u32::MAX);

    let result = bootstrap(&runtime, &dir, &dump, &fast_options(3)).await;

    match result {
        Err(FintermsError::ReadinessTimeout { attempts }) => assert_eq!(attempts, 3),
        other => panic!("expected ReadinessTimeout, got {:?}", other.map(|_| ())),
    }
    let ops = runtime.ops();
    assert_eq!(ops.iter().filter(|op| *op == "probe").count(), 3);
    assert!(!ops.contains(&"load".to_string()));
}

#[tokio::test]
async fn wait_until_ready_treats_zero_attempts_as_one() {
    let runtime = MockRuntime::new(true, 1);
    let attempts = wait_until_ready(&runtime, &fast_options(0)).await.unwrap();
    assert_eq!(attempts, 1);
}
