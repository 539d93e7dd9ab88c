use chrono::Utc;
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::errors::{FintermsError, FintermsResult};
use crate::extraction::client::ChatBackend;
use crate::models::extraction::ContractExtraction;
use crate::models::schema;
use crate::prompts;

/// Contract extraction pipeline: upload the PDF, call the model with the
/// strict schema, deserialize and retry on model nondeterminism.
pub struct ContractExtractor<B: ChatBackend> {
    backend: B,
    max_retries: u32,
}

impl<B: ChatBackend> ContractExtractor<B> {
    pub fn new(backend: B, max_retries: u32) -> Self {
        Self {
            backend,
            max_retries: max_retries.max(1),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Extract financial terms from a PDF contract
    pub async fn extract_from_pdf(
        &self,
        pdf_path: &Path,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FintermsResult<ContractExtraction> {
        if !pdf_path.exists() {
            return Err(FintermsError::MissingPath {
                what: "contract file",
                path: pdf_path.to_path_buf(),
            });
        }

        let file_name = pdf_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                FintermsError::InvalidInput(format!("invalid file name: {}", pdf_path.display()))
            })?;
        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(FintermsError::InvalidInput(format!(
                "file must have a .pdf extension: {file_name}"
            )));
        }

        info!("Analyzing contract: {}", pdf_path.display());
        let bytes = fs::read(pdf_path)?;

        // lowercase the suffix so case-sensitive provider checks accept it
        let upload_name = if file_name.ends_with(".PDF") {
            format!("{}.pdf", file_name.trim_end_matches(".PDF"))
        } else {
            file_name.to_string()
        };

        let file_id = self.backend.upload_document(&upload_name, bytes).await?;
        let response_format = schema::response_format();

        let result = self
            .call_with_retries(system_prompt, user_prompt, &file_id, &response_format)
            .await;

        // uploaded files are billed storage; drop them win or lose
        if let Err(e) = self.backend.delete_document(&file_id).await {
            warn!("Failed to delete uploaded file {}: {}", file_id, e);
        }

        result
    }

    async fn call_with_retries(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        file_id: &str,
        response_format: &Value,
    ) -> FintermsResult<ContractExtraction> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            info!(
                "Calling {} (attempt {}/{})",
                self.backend.model(),
                attempt,
                self.max_retries
            );

            match self
                .backend
                .complete(system_prompt, user_prompt, file_id, response_format)
                .await
                .and_then(|content| parse_extraction(&content))
            {
                Ok(extraction) => {
                    info!("Extraction completed successfully");
                    return Ok(extraction);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    warn!("Attempt {} failed: {}", attempt, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| FintermsError::Api("extraction failed with no attempts".into())))
    }
}

/// Deserialize the model response, distinguishing malformed JSON from JSON
/// that does not fit the extraction schema
pub fn parse_extraction(content: &str) -> FintermsResult<ContractExtraction> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| FintermsError::Parse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| FintermsError::SchemaValidation(e.to_string()))
}

/// Write the extraction as pretty JSON, creating parent directories
pub fn save_results(extraction: &ContractExtraction, output_path: &Path) -> FintermsResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(extraction)?;
    fs::write(output_path, json)?;
    info!("Results saved to: {}", output_path.display());
    Ok(())
}

/// Resolve the output file: an explicit file path wins, a directory gets
/// `{pdf_stem}_extraction.json`, and no argument lands in the configured
/// output directory.
pub fn output_path_for(pdf_path: &Path, output: Option<&Path>, config: &AppConfig) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contract");
    let default_name = format!("{stem}_extraction.json");

    match output {
        Some(path) if path.is_dir() => path.join(default_name),
        Some(path) => path.to_path_buf(),
        None => config.output_dir().join(default_name),
    }
}

/// Load a prompt override from disk, or fall back to the embedded default
pub fn resolve_prompt(path: Option<PathBuf>, default: &str) -> FintermsResult<String> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(FintermsError::PromptNotFound(path));
            }
            Ok(fs::read_to_string(&path)?.trim().to_string())
        }
        None => Ok(default.trim().to_string()),
    }
}

/// Stamp provider-side facts into the metadata when the model left them blank
pub fn finalize_metadata(extraction: &mut ContractExtraction, model: &str) {
    let meta = &mut extraction.extraction_metadata;
    if meta.model_used.trim().is_empty() {
        meta.model_used = model.to_string();
    }
    if meta.extraction_timestamp.trim().is_empty() {
        meta.extraction_timestamp = Utc::now().to_rfc3339();
    }
}

pub fn default_system_prompt() -> &'static str {
    prompts::SYSTEM_PROMPT
}

pub fn default_user_prompt() -> &'static str {
    prompts::USER_PROMPT
}
