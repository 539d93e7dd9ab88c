use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::contract::{MonetaryAmount, PaymentTiming};

/// Form a payment takes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    Cash,
    Equity,
    InKind,
    Percentage,
    AssetBased,
    Hybrid,
}

/// How often a payment recurs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyType {
    OneTime,
    Monthly,
    Quarterly,
    Annually,
    PerTransaction,
    UponMilestone,
}

/// Fee categories the extraction distinguishes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    ServiceFee,
    ManagementFee,
    Commission,
    TransactionFee,
    AssetBasedFee,
    TieredFee,
    PenaltyFee,
    Reimbursement,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BaseCompensation {
    pub description: String,
    pub amount: MonetaryAmount,
    pub payment_type: PaymentType,
    pub frequency: FrequencyType,

    #[schemars(description = "How the amount is computed, verbatim where possible")]
    pub calculation_method: String,

    #[schemars(description = "Conditions attached to the payment, empty if unconditional")]
    pub conditions: String,

    pub payment_timing: PaymentTiming,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RoyaltyTerm {
    pub description: String,

    #[schemars(description = "Royalty rate as written, e.g. \"5%\" or a tiered table summary")]
    pub rate: String,

    pub calculation_base: String,
    pub minimum_amount: String,
    pub maximum_amount: String,
    pub product_scope: String,
    pub territory: String,
    pub special_terms: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FeeTerm {
    pub description: String,
    pub fee_type: FeeType,
    pub amount: MonetaryAmount,
    pub calculation_method: String,
    pub frequency: FrequencyType,

    #[schemars(description = "What the fee applies to; pricing rules reference this")]
    pub applies_to: String,

    pub minimum_amount: MonetaryAmount,
    pub maximum_amount: MonetaryAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EquityTerm {
    pub description: String,
    pub instrument_type: String,

    #[schemars(description = "Share or unit count as written; may be a formula")]
    pub quantity: String,

    #[schemars(description = "Price per share as written; may be a formula")]
    pub share_price: String,

    pub vesting_terms: String,
    pub conversion_rights: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExpenseTerm {
    pub category: String,
    pub coverage: String,
    pub amount_limit: MonetaryAmount,
    pub approval_required: bool,
    pub reimbursement_terms: String,
}

/// All financial terms found in the contract, grouped by category
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct FinancialTerms {
    pub base_compensation: Vec<BaseCompensation>,
    pub royalties: Vec<RoyaltyTerm>,
    pub fees: Vec<FeeTerm>,
    pub equity_compensation: Vec<EquityTerm>,
    pub expenses: Vec<ExpenseTerm>,
}
