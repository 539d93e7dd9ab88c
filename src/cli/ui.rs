use colored::*;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use textwrap::wrap;

use finterms::extraction::analysis;
use finterms::models::extraction::ContractExtraction;

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(10)) {
            println!("  {}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Confirm an action with the user
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the terminal summary of an extraction
pub fn display_summary(extraction: &ContractExtraction) {
    let meta = &extraction.contract_metadata;
    let characteristics = analysis::analyze(extraction);
    let counts = &characteristics.counts;

    print_header("Extraction Summary");

    print_result("Document", &meta.document_title);
    print_result("Contract type", &meta.contract_type);
    if !meta.effective_date.is_empty() || !meta.end_date.is_empty() {
        print_result(
            "Period",
            &format!(
                "{} to {}",
                or_unknown(&meta.effective_date),
                or_unknown(&meta.end_date)
            ),
        );
    }

    if !meta.parties.is_empty() {
        println!("\n{}", "Parties:".bold());
        for party in &meta.parties {
            println!("  - {} ({})", party.entity_name, or_unknown(&party.role));
        }
    }

    println!("\n{}", "Financial terms:".bold());
    print_result("  Base compensation", &counts.base_compensation.to_string());
    print_result("  Royalties", &counts.royalties.to_string());
    print_result("  Fees", &counts.fees.to_string());
    print_result("  Equity", &counts.equity.to_string());
    print_result("  Expenses", &counts.expenses.to_string());
    print_result("  Pricing rules", &counts.pricing_rules.to_string());

    let mut traits: Vec<&str> = Vec::new();
    if characteristics.has_tiered_structures {
        traits.push("tiered structures");
    }
    if characteristics.has_commissions {
        traits.push("commissions");
    }
    if characteristics.has_asset_based_fees {
        traits.push("asset-based fees");
    }
    if characteristics.multi_currency {
        traits.push("multiple currencies");
    }
    if !traits.is_empty() {
        print_result("  Characteristics", &traits.join(", "));
    }
    if let Some(currency) = &characteristics.primary_currency {
        print_result("  Primary currency", currency);
    }

    if !extraction.pricing_rules.rules.is_empty() {
        println!("\n{}", "Pricing rules:".bold());
        for rule in &extraction.pricing_rules.rules {
            println!("  - {}: {}", rule.rule_name, rule.rule_description);
        }
    }

    let quality = &extraction.extraction_metadata;
    println!("\n{}", "Extraction quality:".bold());
    print_result(
        "  Confidence",
        &format!("{:.0}%", quality.overall_confidence * 100.0),
    );
    print_result("  Redacted fields", &quality.redacted_fields_count.to_string());
    if !quality.extraction_notes.is_empty() {
        println!("  {}", "Notes:".bold());
        print_text(&quality.extraction_notes);
    }
    for warning in &quality.processing_warnings {
        print_warning(warning);
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "unknown"
    } else {
        value
    }
}
