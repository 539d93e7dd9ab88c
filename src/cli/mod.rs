use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "finterms",
    about = "Extracts financial terms from contracts and manages the local pricing database",
    version,
    author,
    long_about = None
)]
pub struct FintermsCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract financial terms from a PDF contract
    Extract {
        /// Path to the contract PDF
        pdf: PathBuf,

        /// Output file or directory for the extraction JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the embedded system prompt with a file
        #[arg(long)]
        system_prompt: Option<PathBuf>,

        /// Override the embedded user prompt with a file
        #[arg(long)]
        user_prompt: Option<PathBuf>,

        /// Retry attempts for a failed extraction call
        #[arg(short, long)]
        retries: Option<u32>,

        /// Suppress the terminal summary
        #[arg(short, long, default_value = "false")]
        quiet: bool,
    },

    /// Start the database container and load the SQL dump
    Bootstrap {
        /// Docker Compose project directory (overrides configuration)
        #[arg(short, long)]
        project_dir: Option<PathBuf>,

        /// SQL dump file to load (overrides configuration)
        #[arg(short, long)]
        dump_file: Option<PathBuf>,

        /// Readiness poll attempt limit
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Skip the confirmation prompt before loading the dump
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },

    /// Create the pricing schema, tables, indexes and views
    InitSchema,

    /// Check database connectivity and report loaded schemas
    Check,

    /// Print the extraction JSON schema
    Schema {
        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
