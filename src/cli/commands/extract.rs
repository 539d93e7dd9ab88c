use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::ui;
use finterms::config::AppConfig;
use finterms::errors::FintermsError;
use finterms::extraction::extractor::{
    self, default_system_prompt, default_user_prompt, output_path_for, resolve_prompt,
    save_results,
};
use finterms::extraction::validate;
use finterms::extraction::{ContractExtractor, OpenAiBackend};

/// Extract command: run the full pipeline from PDF to saved extraction JSON
pub async fn execute(
    config: &AppConfig,
    pdf: &Path,
    output: Option<PathBuf>,
    system_prompt: Option<PathBuf>,
    user_prompt: Option<PathBuf>,
    retries: Option<u32>,
    quiet: bool,
) -> Result<()> {
    let api_key = config.api_key().ok_or(FintermsError::MissingApiKey)?;
    let model = config.model();
    let max_retries = retries.unwrap_or_else(|| config.max_retries());

    let system_prompt = resolve_prompt(
        system_prompt.or_else(|| config.system_prompt_path()),
        default_system_prompt(),
    )?;
    let user_prompt = resolve_prompt(
        user_prompt.or_else(|| config.user_prompt_path()),
        default_user_prompt(),
    )?;

    let backend = OpenAiBackend::new(api_key, model.clone())?;
    let extractor = ContractExtractor::new(backend, max_retries);

    if !quiet {
        ui::print_header("Contract Extraction");
        ui::print_result("Contract", &pdf.display().to_string());
        ui::print_result("Model", &model);
    }

    let spinner = ui::spinner_with_message("Extracting financial terms...");
    let result = extractor
        .extract_from_pdf(pdf, &system_prompt, &user_prompt)
        .await;
    spinner.finish_and_clear();

    let mut extraction = result?;
    extractor::finalize_metadata(&mut extraction, &model);

    // Invariant issues are reported but do not discard the extraction
    let issues = validate::validate(&extraction);
    for issue in &issues {
        ui::print_warning(issue);
    }

    let output_path = output_path_for(pdf, output.as_deref(), config);
    save_results(&extraction, &output_path)?;

    if !quiet {
        ui::display_summary(&extraction);
    }
    ui::print_success(&format!("Results saved to {}", output_path.display()));

    Ok(())
}
