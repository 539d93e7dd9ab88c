use std::path::PathBuf;

use crate::config::{AppConfig, ConfigError, DEFAULT_MAX_READY_ATTEMPTS, DEFAULT_MODEL};
use crate::tests::fixtures;

const FULL_CONFIG: &str = r#"
llm:
  api_key: test-key
  model: gpt-4o-mini
  max_retries: 5
database:
  host: localhost
  port: 5433
  name: pricing
  user: pricing_app
  password: file-secret
  project_dir: /srv/compose
  dump_file: /srv/dumps/pricing.sql
output_dir: extractions
"#;

fn parse(contents: &str) -> AppConfig {
    serde_yaml::from_str(contents).unwrap()
}

#[test]
fn config_file_values_resolve() {
    let config = parse(FULL_CONFIG);

    assert_eq!(config.api_key().as_deref(), Some("test-key"));
    assert_eq!(config.model(), "gpt-4o-mini");
    assert_eq!(config.max_retries(), 5);
    assert_eq!(config.output_dir(), PathBuf::from("extractions"));

    let db = config.database().unwrap();
    assert_eq!(db.host, "localhost");
    assert_eq!(db.port, 5433);
    assert_eq!(db.name, "pricing");
    assert_eq!(db.user, "pricing_app");
    assert_eq!(db.password, "file-secret");
    assert_eq!(db.project_dir, PathBuf::from("/srv/compose"));
    assert_eq!(db.dump_file, Some(PathBuf::from("/srv/dumps/pricing.sql")));
    assert_eq!(db.service, "db");
    assert_eq!(db.max_ready_attempts, DEFAULT_MAX_READY_ATTEMPTS);
}

#[test]
fn empty_config_falls_back_to_pinned_model() {
    let config = parse("{}");
    if std::env::var("OPENAI_MODEL").is_err() {
        assert_eq!(config.model(), DEFAULT_MODEL);
    }
}

#[test]
fn missing_credentials_are_an_error_not_a_default() {
    let partial = r#"
database:
  host: localhost
  port: 5432
  name: pricing
  user: pricing_app
"#;
    let config = parse(partial);
    if std::env::var("DB_PASSWORD").is_err() {
        match config.database() {
            Err(ConfigError::MissingSetting(setting)) => {
                assert!(setting.contains("DB_PASSWORD"));
            }
            other => panic!("expected MissingSetting, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn config_file_round_trips_through_disk() {
    let dir = fixtures::scratch_dir("config");
    let path = dir.join("finterms.yaml");
    std::fs::write(&path, FULL_CONFIG).unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.api_key().as_deref(), Some("test-key"));

    let missing = dir.join("absent.yaml");
    assert!(AppConfig::from_file(&missing).is_err());
}
