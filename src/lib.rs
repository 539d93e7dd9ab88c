pub mod config;
pub mod db;
pub mod errors;
pub mod extraction;
pub mod models;
pub mod prompts;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{AppConfig, ConfigError, ResolvedDatabase};
pub use db::{
    bootstrap::{bootstrap, BootstrapOptions, BootstrapReport},
    check::{check, CheckReport},
    runtime::{ContainerRuntime, DockerComposeRuntime},
};
pub use errors::{FintermsError, FintermsResult};
pub use extraction::{ChatBackend, ContractExtractor, OpenAiBackend};
pub use models::{
    contract::{ContractMetadata, ContractParty, MonetaryAmount},
    extraction::{ContractExtraction, ExtractionMetadata},
    financial::{FeeType, FinancialTerms, FrequencyType, PaymentType},
    rules::{PricingRule, PricingRules},
};
