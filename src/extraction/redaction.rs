use crate::models::financial::FinancialTerms;

/// Returns true when `value` is a redaction marker rather than an amount.
///
/// Recognized families: empty brackets `[ ]`, masked amounts `$[**]` /
/// `[***]`, underscore runs, the literal `[REDACTED]`, and hash runs.
pub fn is_redaction_marker(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    if trimmed.eq_ignore_ascii_case("[redacted]") {
        return true;
    }

    // $[**] and [***]: optional currency sign, brackets around asterisks
    let bracketed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    if let Some(interior) = bracketed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        if !interior.is_empty() && interior.chars().all(|c| c == '*') {
            return true;
        }
        // [ ] with only whitespace inside
        if interior.chars().all(char::is_whitespace) {
            return true;
        }
    }

    if trimmed.contains("___") || (trimmed.len() >= 2 && trimmed.chars().all(|c| c == '_')) {
        return true;
    }

    if trimmed.contains("###") || (trimmed.len() >= 2 && trimmed.chars().all(|c| c == '#')) {
        return true;
    }

    false
}

/// Count amounts flagged as redacted across all financial term categories
pub fn count_redacted_amounts(terms: &FinancialTerms) -> u32 {
    let mut count = 0u32;
    for comp in &terms.base_compensation {
        count += u32::from(comp.amount.is_redacted);
    }
    for fee in &terms.fees {
        count += u32::from(fee.amount.is_redacted);
        count += u32::from(fee.minimum_amount.is_redacted);
        count += u32::from(fee.maximum_amount.is_redacted);
    }
    for expense in &terms.expenses {
        count += u32::from(expense.amount_limit.is_redacted);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_marker_family() {
        for marker in ["[ ]", "[]", "$[**]", "[***]", "____", "[REDACTED]", "[redacted]", "###", "amount: ___ per month"] {
            assert!(is_redaction_marker(marker), "{marker:?} should be a marker");
        }
    }

    #[test]
    fn rejects_ordinary_values() {
        for value in ["$1,500.00", "2% of gross revenue", "", "USD 40,000", "[see exhibit A]", "_"] {
            assert!(!is_redaction_marker(value), "{value:?} is not a marker");
        }
    }
}
