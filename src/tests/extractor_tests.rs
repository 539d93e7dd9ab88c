use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::errors::{FintermsError, FintermsResult};
use crate::extraction::client::ChatBackend;
use crate::extraction::extractor::{
    finalize_metadata, output_path_for, parse_extraction, ContractExtractor,
};
use crate::tests::fixtures;

/// Backend that replays a scripted sequence of completion responses
struct MockBackend {
    responses: Mutex<Vec<String>>,
    next: AtomicUsize,
    uploads: AtomicU32,
    deletes: AtomicU32,
}

impl MockBackend {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            next: AtomicUsize::new(0),
            uploads: AtomicU32::new(0),
            deletes: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn upload_document(&self, _file_name: &str, _bytes: Vec<u8>) -> FintermsResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok("file-mock".to_string())
    }

    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _file_id: &str,
        _response_format: &Value,
    ) -> FintermsResult<String> {
        let responses = self.responses.lock().unwrap();
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        // replay the last response once the script runs out
        Ok(responses[index.min(responses.len() - 1)].clone())
    }

    async fn delete_document(&self, _file_id: &str) -> FintermsResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

fn pdf_fixture(label: &str) -> PathBuf {
    let dir = fixtures::scratch_dir(label);
    let pdf = dir.join("contract.pdf");
    std::fs::write(&pdf, b"%PDF-1.4 minimal").unwrap();
    pdf
}

fn valid_response() -> String {
    serde_json::to_string(&fixtures::empty_extraction()).unwrap()
}

#[tokio::test]
async fn invalid_json_then_valid_succeeds_with_one_upload_and_one_delete() {
    let pdf = pdf_fixture("retry-succeeds");
    let valid = valid_response();
    let backend = MockBackend::new(vec!["this is not json", &valid]);
    let extractor = ContractExtractor::new(backend, 3);

    let extraction = extractor
        .extract_from_pdf(&pdf, "system", "user")
        .await
        .unwrap();

    assert_eq!(extraction.contract_metadata.total_pages, 12);
    let backend = extractor.backend();
    assert_eq!(backend.uploads.load(Ordering::SeqCst), 1);
    assert_eq!(backend.deletes.load(Ordering::SeqCst), 1);
    assert_eq!(backend.next.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn persistently_invalid_json_fails_with_a_parse_error() {
    let pdf = pdf_fixture("parse-error");
    let backend = MockBackend::new(vec!["{ truncated"]);
    let extractor = ContractExtractor::new(backend, 2);

    let result = extractor.extract_from_pdf(&pdf, "system", "user").await;

    assert!(matches!(result, Err(FintermsError::Parse(_))));
    let backend = extractor.backend();
    assert_eq!(backend.next.load(Ordering::SeqCst), 2);
    // the uploaded file is still deleted after a failed extraction
    assert_eq!(backend.deletes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_top_level_field_fails_schema_validation() {
    let pdf = pdf_fixture("schema-error");
    let mut value: Value = serde_json::to_value(fixtures::empty_extraction()).unwrap();
    value["surprise_section"] = serde_json::json!({});
    let drifted = value.to_string();
    let backend = MockBackend::new(vec![&drifted]);
    let extractor = ContractExtractor::new(backend, 2);

    let result = extractor.extract_from_pdf(&pdf, "system", "user").await;

    assert!(matches!(result, Err(FintermsError::SchemaValidation(_))));
}

#[tokio::test]
async fn missing_file_is_rejected_before_any_backend_call() {
    let missing = std::env::temp_dir().join("finterms-test-absent.pdf");
    let backend = MockBackend::new(vec!["unused"]);
    let extractor = ContractExtractor::new(backend, 2);

    let result = extractor.extract_from_pdf(&missing, "system", "user").await;

    assert!(matches!(result, Err(FintermsError::MissingPath { .. })));
    assert_eq!(extractor.backend().uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_pdf_extension_is_rejected() {
    let dir = fixtures::scratch_dir("not-a-pdf");
    let doc = dir.join("contract.docx");
    std::fs::write(&doc, b"not a pdf").unwrap();
    let backend = MockBackend::new(vec!["unused"]);
    let extractor = ContractExtractor::new(backend, 2);

    let result = extractor.extract_from_pdf(&doc, "system", "user").await;

    assert!(matches!(result, Err(FintermsError::InvalidInput(_))));
    assert_eq!(extractor.backend().uploads.load(Ordering::SeqCst), 0);
}

#[test]
fn parse_extraction_distinguishes_bad_json_from_schema_drift() {
    assert!(matches!(
        parse_extraction("not json at all"),
        Err(FintermsError::Parse(_))
    ));
    assert!(matches!(
        parse_extraction(r#"{"unexpected": true}"#),
        Err(FintermsError::SchemaValidation(_))
    ));
    assert!(parse_extraction(&valid_response()).is_ok());
}

#[test]
fn output_path_resolution_prefers_explicit_file() {
    let config = AppConfig::default();
    let pdf = PathBuf::from("contracts/acme_msa.pdf");

    let explicit = PathBuf::from("out/result.json");
    assert_eq!(
        output_path_for(&pdf, Some(explicit.as_path()), &config),
        explicit
    );

    let dir = fixtures::scratch_dir("output-dir");
    assert_eq!(
        output_path_for(&pdf, Some(dir.as_path()), &config),
        dir.join("acme_msa_extraction.json")
    );

    assert_eq!(
        output_path_for(&pdf, None, &config),
        config.output_dir().join("acme_msa_extraction.json")
    );
}

#[test]
fn finalize_metadata_only_fills_blank_fields() {
    let mut extraction = fixtures::empty_extraction();
    extraction.extraction_metadata.model_used = String::new();
    finalize_metadata(&mut extraction, "gpt-4o-2024-08-06");
    assert_eq!(extraction.extraction_metadata.model_used, "gpt-4o-2024-08-06");
    assert_eq!(
        extraction.extraction_metadata.extraction_timestamp,
        "2024-05-01T00:00:00Z"
    );
}
