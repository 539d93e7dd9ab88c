use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Quality metadata the model reports about its own extraction
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractionMetadata {
    #[schemars(description = "RFC 3339 timestamp of the extraction")]
    pub extraction_timestamp: String,

    pub model_used: String,

    #[schemars(description = "Overall confidence between 0.0 and 1.0")]
    pub overall_confidence: f64,

    pub redacted_fields_count: u32,
    pub extraction_notes: String,
    pub processing_warnings: Vec<String>,
}

/// Root of the extraction result, produced once per document as a single
/// JSON object. Unknown fields are rejected so a drifting model response
/// fails fast instead of silently losing data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContractExtraction {
    pub contract_metadata: crate::models::contract::ContractMetadata,
    pub financial_terms: crate::models::financial::FinancialTerms,
    pub pricing_rules: crate::models::rules::PricingRules,
    pub extraction_metadata: ExtractionMetadata,
}
