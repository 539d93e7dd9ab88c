use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Settings for the OpenAI extraction backend
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LlmConfig {
    /// API key; falls back to the OPENAI_API_KEY environment variable
    pub api_key: Option<String>,

    /// Model name; falls back to OPENAI_MODEL, then the pinned default
    pub model: Option<String>,

    /// Retry attempts for a failed extraction call
    pub max_retries: Option<u32>,

    /// Override for the embedded system prompt
    pub system_prompt_path: Option<PathBuf>,

    /// Override for the embedded user prompt
    pub user_prompt_path: Option<PathBuf>,
}

/// Connection and bootstrap settings for the local Postgres instance.
/// Credentials carry no defaults on purpose.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,

    /// Docker Compose project directory holding the database service
    pub project_dir: Option<PathBuf>,

    /// SQL dump file loaded by the bootstrap command
    pub dump_file: Option<PathBuf>,

    /// Compose service name of the database container
    pub service: Option<String>,

    /// Readiness poll attempt limit
    pub max_ready_attempts: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Directory for extraction JSON output
    pub output_dir: Option<PathBuf>,
}

pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_DB_SERVICE: &str = "db";
pub const DEFAULT_MAX_READY_ATTEMPTS: u32 = 30;

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the config file when given, otherwise start from an empty
    /// config and let the environment fill everything in.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the API key, checking the environment when the config
    /// file does not carry one.
    pub fn api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .or_else(|| env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }

    pub fn model(&self) -> String {
        self.llm
            .model
            .clone()
            .or_else(|| env::var("OPENAI_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn max_retries(&self) -> u32 {
        self.llm
            .max_retries
            .or_else(|| env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn system_prompt_path(&self) -> Option<PathBuf> {
        self.llm
            .system_prompt_path
            .clone()
            .or_else(|| env::var("SYSTEM_PROMPT_PATH").ok().map(PathBuf::from))
    }

    pub fn user_prompt_path(&self) -> Option<PathBuf> {
        self.llm
            .user_prompt_path
            .clone()
            .or_else(|| env::var("USER_PROMPT_PATH").ok().map(PathBuf::from))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| env::var("OUTPUT_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("outputs"))
    }

    /// Resolve the database settings, requiring every credential to be
    /// present. There are no default secrets.
    pub fn database(&self) -> Result<ResolvedDatabase, ConfigError> {
        let db = &self.database;

        let host = resolve(db.host.clone(), "DB_HOST")
            .ok_or(ConfigError::MissingSetting("database host (DB_HOST)"))?;
        let port = match resolve(db.port.map(|p| p.to_string()), "DB_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("database port", raw))?,
            None => return Err(ConfigError::MissingSetting("database port (DB_PORT)")),
        };
        let name = resolve(db.name.clone(), "DB_NAME")
            .ok_or(ConfigError::MissingSetting("database name (DB_NAME)"))?;
        let user = resolve(db.user.clone(), "DB_USER")
            .ok_or(ConfigError::MissingSetting("database user (DB_USER)"))?;
        let password = resolve(db.password.clone(), "DB_PASSWORD")
            .ok_or(ConfigError::MissingSetting("database password (DB_PASSWORD)"))?;

        let project_dir = db
            .project_dir
            .clone()
            .or_else(|| env::var("COMPOSE_PROJECT_DIR").ok().map(PathBuf::from))
            .ok_or(ConfigError::MissingSetting(
                "compose project directory (COMPOSE_PROJECT_DIR)",
            ))?;
        let dump_file = db
            .dump_file
            .clone()
            .or_else(|| env::var("DUMP_FILE").ok().map(PathBuf::from));

        Ok(ResolvedDatabase {
            host,
            port,
            name,
            user,
            password,
            project_dir,
            dump_file,
            service: db
                .service
                .clone()
                .or_else(|| env::var("DB_SERVICE").ok())
                .unwrap_or_else(|| DEFAULT_DB_SERVICE.to_string()),
            max_ready_attempts: db.max_ready_attempts.unwrap_or(DEFAULT_MAX_READY_ATTEMPTS),
        })
    }
}

fn resolve(from_file: Option<String>, env_var: &str) -> Option<String> {
    from_file
        .or_else(|| env::var(env_var).ok())
        .filter(|v| !v.is_empty())
}

/// Fully validated database settings
#[derive(Debug, Clone)]
pub struct ResolvedDatabase {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub project_dir: PathBuf,
    pub dump_file: Option<PathBuf>,
    pub service: String,
    pub max_ready_attempts: u32,
}
