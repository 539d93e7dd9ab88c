use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use std::time::Duration;

use crate::errors::{FintermsError, FintermsResult};

const OPENAI_FILES_URL: &str = "https://api.openai.com/v1/files";
const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The seam between the extraction pipeline and the model provider.
/// Production uses OpenAI; tests script this trait.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Upload a document and return the provider's file id
    async fn upload_document(&self, file_name: &str, bytes: Vec<u8>) -> FintermsResult<String>;

    /// Run one structured-output completion over an uploaded document and
    /// return the raw response content
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        file_id: &str,
        response_format: &Value,
    ) -> FintermsResult<String>;

    /// Delete an uploaded document. Best-effort on the caller's side.
    async fn delete_document(&self, file_id: &str) -> FintermsResult<()>;

    /// Model identifier, recorded in extraction output
    fn model(&self) -> &str;
}

/// OpenAI chat-completions backend with structured output
pub struct OpenAiBackend {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(api_key: String, model: String) -> FintermsResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| FintermsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_key,
            model,
        })
    }

    async fn check_status(response: reqwest::Response) -> FintermsResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read error body".to_string());
        warn!("API error: HTTP {} - {}", status, message);
        Err(FintermsError::Http { status, message })
    }

    fn network_err(context: &str, e: reqwest::Error) -> FintermsError {
        let message = format!("{context}: {e}");
        warn!("{}", message);
        if e.is_timeout() {
            warn!("Request timed out");
        }
        if e.is_connect() {
            warn!("Connection error - check network connectivity");
        }
        FintermsError::Network(message)
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn upload_document(&self, file_name: &str, bytes: Vec<u8>) -> FintermsResult<String> {
        info!("Uploading {} to OpenAI ({} bytes)", file_name, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| FintermsError::Api(format!("invalid upload part: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .http_client
            .post(OPENAI_FILES_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::network_err("file upload failed", e))?;
        let response = Self::check_status(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| FintermsError::Parse(format!("upload response: {e}")))?;
        let file_id = body["id"]
            .as_str()
            .ok_or_else(|| FintermsError::Api("upload response missing file id".to_string()))?
            .to_string();

        debug!("Uploaded file id: {}", file_id);
        Ok(file_id)
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        file_id: &str,
        response_format: &Value,
    ) -> FintermsResult<String> {
        debug!("Chat request: model={} file={}", self.model, file_id);

        let request = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": user_prompt },
                        { "type": "file", "file": { "file_id": file_id } }
                    ]
                }
            ],
            "response_format": response_format,
            "temperature": 0.1,
            "max_tokens": 8192
        });

        let response = self
            .http_client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::network_err("chat completion failed", e))?;
        let response = Self::check_status(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| FintermsError::Parse(format!("chat response: {e}")))?;

        let content = body["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| FintermsError::Api("empty response from model".to_string()))?;
        if content.is_empty() {
            return Err(FintermsError::Api("empty response from model".to_string()));
        }

        debug!("Response content length: {} characters", content.len());
        Ok(content.to_string())
    }

    async fn delete_document(&self, file_id: &str) -> FintermsResult<()> {
        debug!("Deleting uploaded file {}", file_id);
        let response = self
            .http_client
            .delete(format!("{OPENAI_FILES_URL}/{file_id}"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Self::network_err("file delete failed", e))?;
        Self::check_status(response).await?;
        Ok(())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
