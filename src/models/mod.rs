pub mod contract;
pub mod extraction;
pub mod financial;
pub mod rules;
pub mod schema;

pub use contract::{ContractMetadata, ContractParty, MonetaryAmount, PaymentTiming};
pub use extraction::{ContractExtraction, ExtractionMetadata};
pub use financial::{
    BaseCompensation, EquityTerm, ExpenseTerm, FeeTerm, FeeType, FinancialTerms, FrequencyType,
    PaymentType, RoyaltyTerm,
};
pub use rules::{PricingRule, PricingRules};
