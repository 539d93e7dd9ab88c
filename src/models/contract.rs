use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A monetary value as it appears in the contract. The value stays a string
/// because contracts routinely express amounts as formulas ("2% of gross
/// revenue") or hide them behind redaction markers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MonetaryAmount {
    #[schemars(description = "Amount as written: a number, a formula, or a redaction marker")]
    pub value: String,

    #[schemars(description = "ISO currency code, or empty when not stated")]
    pub currency: String,

    #[schemars(description = "True when the amount is hidden behind a redaction marker")]
    pub is_redacted: bool,

    #[schemars(description = "The literal redaction marker found, empty when not redacted")]
    pub redaction_pattern: String,
}

/// One legal entity named in the contract
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContractParty {
    pub entity_name: String,
    pub entity_type: String,
    pub role: String,
    pub address: String,
    pub jurisdiction: String,
}

/// When and how a payment falls due
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PaymentTiming {
    #[schemars(description = "Due date or rule, e.g. \"within 15 days of month end\"")]
    pub due_date: String,
    pub grace_period: String,
    pub late_fees: String,
    pub payment_method: String,
}

/// Document-level facts about the contract
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContractMetadata {
    pub document_title: String,
    pub contract_type: String,

    #[schemars(description = "Effective date in YYYY-MM-DD form when determinable")]
    pub effective_date: String,

    #[schemars(description = "End date in YYYY-MM-DD form when determinable")]
    pub end_date: String,

    pub parties: Vec<ContractParty>,
    pub total_pages: u32,
    pub governing_law: String,
    pub jurisdiction: String,
}
