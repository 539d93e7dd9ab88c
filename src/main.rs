use anyhow::Result;
use clap::Parser;
use log::info;

use finterms::config::AppConfig;

mod cli;
use cli::{FintermsCli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = FintermsCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    // Pick up OPENAI_API_KEY, DB_* and friends from a local .env
    dotenv::dotenv().ok();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            pdf,
            output,
            system_prompt,
            user_prompt,
            retries,
            quiet,
        } => {
            cli::commands::extract::execute(
                &config,
                &pdf,
                output,
                system_prompt,
                user_prompt,
                retries,
                quiet,
            )
            .await?;
        }

        Commands::Bootstrap {
            project_dir,
            dump_file,
            max_attempts,
            yes,
        } => {
            cli::commands::bootstrap::execute(&config, project_dir, dump_file, max_attempts, yes)
                .await?;
        }

        Commands::InitSchema => {
            cli::commands::schema::execute_init(&config).await?;
        }

        Commands::Check => {
            cli::commands::check::execute(&config).await?;
        }

        Commands::Schema { output } => {
            cli::commands::schema::execute_print(output)?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
