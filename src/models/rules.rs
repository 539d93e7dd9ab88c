use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An implementable restatement of a financial calculation described in
/// contract prose. Every tiered, percentage or conditional financial term
/// must be backed by one of these.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PricingRule {
    pub rule_name: String,
    pub rule_description: String,

    #[schemars(description = "Kind of rule, e.g. tiered, percentage, conditional, flat")]
    pub rule_type: String,

    #[schemars(description = "What event or condition triggers the rule")]
    pub triggers: String,

    #[schemars(description = "The calculation, stated precisely enough to implement")]
    pub calculation: String,

    #[schemars(description = "The financial term this rule applies to, matching its applies_to or description")]
    pub applies_to: String,

    pub effective_period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct PricingRules {
    pub rules: Vec<PricingRule>,
}
