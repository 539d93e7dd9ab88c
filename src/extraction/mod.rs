pub mod analysis;
pub mod client;
pub mod extractor;
pub mod redaction;
pub mod validate;

pub use client::{ChatBackend, OpenAiBackend};
pub use extractor::ContractExtractor;
