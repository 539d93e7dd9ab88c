use crate::errors::FintermsError;
use crate::extraction::{analysis, validate};
use crate::models::financial::FeeType;
use crate::tests::fixtures::{self, amount, fee, redacted_amount, rule};

#[test]
fn clean_extraction_has_no_violations() {
    let extraction = fixtures::empty_extraction();
    assert!(validate::validate(&extraction).is_empty());
    assert!(validate::validate_strict(&extraction).is_ok());
}

#[test]
fn tiered_fee_without_a_pricing_rule_is_flagged() {
    let mut extraction = fixtures::empty_extraction();
    extraction.financial_terms.fees.push(fee(
        "Management fee",
        FeeType::TieredFee,
        "assets under management",
        "1.5% up to $10M, 1.0% above",
        amount("", "USD"),
    ));

    let issues = validate::validate(&extraction);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].contains("Management fee"));
}

#[test]
fn matching_pricing_rule_satisfies_the_invariant() {
    let mut extraction = fixtures::empty_extraction();
    extraction.financial_terms.fees.push(fee(
        "Management fee",
        FeeType::TieredFee,
        "assets under management",
        "1.5% up to $10M, 1.0% above",
        amount("", "USD"),
    ));
    extraction
        .pricing_rules
        .rules
        .push(rule("Tiered management fee", "assets under management"));

    assert!(validate::validate(&extraction).is_empty());
}

#[test]
fn flat_fee_needs_no_pricing_rule() {
    let mut extraction = fixtures::empty_extraction();
    extraction.financial_terms.fees.push(fee(
        "Document fee",
        FeeType::ServiceFee,
        "each filing",
        "",
        amount("250.00", "USD"),
    ));

    assert!(validate::validate(&extraction).is_empty());
}

#[test]
fn redacted_count_mismatch_is_flagged() {
    let mut extraction = fixtures::empty_extraction();
    extraction.financial_terms.fees.push(fee(
        "Service fee",
        FeeType::ServiceFee,
        "monthly service",
        "",
        redacted_amount("$[**]"),
    ));
    extraction.extraction_metadata.redacted_fields_count = 0;

    let issues = validate::validate(&extraction);
    assert!(issues.iter().any(|i| i.contains("redacted_fields_count")));
}

#[test]
fn redaction_marker_with_unset_flag_is_flagged() {
    let mut extraction = fixtures::empty_extraction();
    extraction.financial_terms.fees.push(fee(
        "Service fee",
        FeeType::ServiceFee,
        "monthly service",
        "",
        amount("[REDACTED]", "USD"),
    ));

    let issues = validate::validate(&extraction);
    assert!(issues.iter().any(|i| i.contains("is_redacted is false")));
}

#[test]
fn out_of_range_confidence_is_flagged() {
    let mut extraction = fixtures::empty_extraction();
    extraction.extraction_metadata.overall_confidence = 1.3;

    let issues = validate::validate(&extraction);
    assert!(issues.iter().any(|i| i.contains("overall_confidence")));
}

#[test]
fn validate_strict_collects_all_violations() {
    let mut extraction = fixtures::empty_extraction();
    extraction.extraction_metadata.overall_confidence = -0.5;
    extraction.financial_terms.fees.push(fee(
        "Commission",
        FeeType::TieredFee,
        "gross sales",
        "3% of gross sales",
        amount("", "USD"),
    ));

    match validate::validate_strict(&extraction) {
        Err(FintermsError::InvariantViolations(issues)) => assert_eq!(issues.len(), 2),
        other => panic!("expected InvariantViolations, got {:?}", other),
    }
}

#[test]
fn analysis_detects_structural_traits_and_currency_mix() {
    let mut extraction = fixtures::empty_extraction();
    extraction.financial_terms.fees.push(fee(
        "Management fee",
        FeeType::TieredFee,
        "assets under management",
        "tiered by balance",
        amount("", "USD"),
    ));
    extraction.financial_terms.fees.push(fee(
        "Sales commission",
        FeeType::Commission,
        "gross sales",
        "3% of gross sales",
        amount("", "EUR"),
    ));

    let characteristics = analysis::analyze(&extraction);
    assert!(characteristics.has_tiered_structures);
    assert!(characteristics.has_commissions);
    assert!(!characteristics.has_asset_based_fees);
    assert!(characteristics.multi_currency);
    assert_eq!(characteristics.primary_currency.as_deref(), Some("USD"));
    assert_eq!(characteristics.counts.fees, 2);
    assert_eq!(characteristics.counts.base_compensation, 0);
}
