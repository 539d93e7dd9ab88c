use crate::errors::{FintermsError, FintermsResult};
use crate::extraction::redaction;
use crate::models::extraction::ContractExtraction;
use crate::models::financial::{FeeType, PaymentType};
use crate::models::rules::PricingRule;

/// Checks the pricing-rule invariant locally instead of trusting the model
/// to self-police: every financial term that carries a calculation, a
/// conditional payment, or a tiered/percentage structure must be referenced
/// by a pricing rule through `applies_to`.
///
/// Returns the list of violations; empty means the extraction is coherent.
pub fn validate(extraction: &ContractExtraction) -> Vec<String> {
    let mut issues = Vec::new();

    let confidence = extraction.extraction_metadata.overall_confidence;
    if !(0.0..=1.0).contains(&confidence) {
        issues.push(format!(
            "overall_confidence {confidence} is outside [0.0, 1.0]"
        ));
    }

    let rules = &extraction.pricing_rules.rules;
    let terms = &extraction.financial_terms;

    for fee in &terms.fees {
        let structured = matches!(fee.fee_type, FeeType::TieredFee | FeeType::AssetBasedFee)
            || has_calculation(&fee.calculation_method);
        if structured && !rule_covers(rules, &fee.applies_to, &fee.description) {
            issues.push(format!(
                "fee \"{}\" has a calculated structure but no pricing rule references it",
                fee.description
            ));
        }
    }

    for comp in &terms.base_compensation {
        let conditional = matches!(comp.payment_type, PaymentType::Percentage)
            || has_calculation(&comp.calculation_method)
            || !comp.conditions.trim().is_empty();
        if conditional && !rule_covers(rules, &comp.description, &comp.calculation_method) {
            issues.push(format!(
                "base compensation \"{}\" is conditional or calculated but no pricing rule references it",
                comp.description
            ));
        }
    }

    for royalty in &terms.royalties {
        if has_calculation(&royalty.rate) && !rule_covers(rules, &royalty.description, &royalty.rate)
        {
            issues.push(format!(
                "royalty \"{}\" has a rate structure but no pricing rule references it",
                royalty.description
            ));
        }
    }

    let flagged = redaction::count_redacted_amounts(terms);
    let reported = extraction.extraction_metadata.redacted_fields_count;
    if flagged != reported {
        issues.push(format!(
            "redacted_fields_count is {reported} but {flagged} amounts are flagged as redacted"
        ));
    }

    for comp in &terms.base_compensation {
        if redaction::is_redaction_marker(&comp.amount.value) && !comp.amount.is_redacted {
            issues.push(format!(
                "base compensation \"{}\" holds redaction marker {:?} but is_redacted is false",
                comp.description, comp.amount.value
            ));
        }
    }
    for fee in &terms.fees {
        if redaction::is_redaction_marker(&fee.amount.value) && !fee.amount.is_redacted {
            issues.push(format!(
                "fee \"{}\" holds redaction marker {:?} but is_redacted is false",
                fee.description, fee.amount.value
            ));
        }
    }

    issues
}

/// Same check, surfaced as an error when any violation exists
pub fn validate_strict(extraction: &ContractExtraction) -> FintermsResult<()> {
    let issues = validate(extraction);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(FintermsError::InvariantViolations(issues))
    }
}

/// Calculated, tiered or percentage structures show up in free text as
/// percentages, tier language or explicit conditionals
fn has_calculation(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains('%')
        || lower.contains("percent")
        || lower.contains("tier")
        || lower.contains("if ")
        || lower.contains("formula")
}

fn rule_covers(rules: &[PricingRule], primary: &str, secondary: &str) -> bool {
    let primary = primary.trim().to_lowercase();
    let secondary = secondary.trim().to_lowercase();
    rules.iter().any(|rule| {
        let target = rule.applies_to.trim().to_lowercase();
        if target.is_empty() {
            return false;
        }
        overlaps(&target, &primary) || overlaps(&target, &secondary)
    })
}

fn overlaps(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}
