use crate::models::extraction::ContractExtraction;
use crate::models::financial::FeeType;

/// Per-category item counts for the terminal summary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    pub base_compensation: usize,
    pub royalties: usize,
    pub fees: usize,
    pub equity: usize,
    pub expenses: usize,
    pub pricing_rules: usize,
}

/// Derived characteristics of an extraction, used for the summary output
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinancialCharacteristics {
    pub has_tiered_structures: bool,
    pub has_commissions: bool,
    pub has_asset_based_fees: bool,
    pub multi_currency: bool,
    pub primary_currency: Option<String>,
    pub counts: CategoryCounts,
}

/// Scan the extraction for structural traits: tiering, commissions,
/// asset-based fees, and currency mix
pub fn analyze(extraction: &ContractExtraction) -> FinancialCharacteristics {
    let terms = &extraction.financial_terms;
    let mut characteristics = FinancialCharacteristics {
        counts: CategoryCounts {
            base_compensation: terms.base_compensation.len(),
            royalties: terms.royalties.len(),
            fees: terms.fees.len(),
            equity: terms.equity_compensation.len(),
            expenses: terms.expenses.len(),
            pricing_rules: extraction.pricing_rules.rules.len(),
        },
        ..Default::default()
    };

    // first-seen order keeps primary_currency deterministic
    let mut currencies: Vec<String> = Vec::new();
    let mut note_currency = |currency: &str, currencies: &mut Vec<String>| {
        let currency = currency.trim();
        if !currency.is_empty() && !currencies.iter().any(|c| c == currency) {
            currencies.push(currency.to_string());
        }
    };

    for fee in &terms.fees {
        let calculation = fee.calculation_method.to_lowercase();

        if matches!(fee.fee_type, FeeType::TieredFee)
            || calculation.contains("tier")
            || calculation.contains('%')
        {
            characteristics.has_tiered_structures = true;
        }
        if matches!(fee.fee_type, FeeType::Commission) {
            characteristics.has_commissions = true;
        }
        if matches!(fee.fee_type, FeeType::AssetBasedFee) || calculation.contains("asset") {
            characteristics.has_asset_based_fees = true;
        }

        note_currency(&fee.amount.currency, &mut currencies);
    }

    for comp in &terms.base_compensation {
        note_currency(&comp.amount.currency, &mut currencies);
    }

    characteristics.multi_currency = currencies.len() > 1;
    characteristics.primary_currency = currencies.into_iter().next();
    characteristics
}
