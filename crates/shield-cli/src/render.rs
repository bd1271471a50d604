//! Phase-dependent terminal rendering: result view, error banner, tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use shield_model::{AnalysisResult, RiskLevel, Verdict};
use shield_session::FeedbackStats;
use shield_validate::ErrorMap;

/// One-line verdict banner for the result view.
#[must_use]
pub fn verdict_banner(result: &AnalysisResult) -> String {
    match result.verdict {
        Verdict::Fraudulent => "FRAUDULENT - do not trust this content".to_string(),
        Verdict::Legitimate => "LEGITIMATE - no fraud indicators found".to_string(),
        Verdict::Unknown => "UNVERIFIED - the backend returned no classification".to_string(),
    }
}

/// Render the canonical result view.
pub fn print_result(result: &AnalysisResult) {
    println!();
    println!("  {}", verdict_banner(result));
    println!();

    let mut table = summary_table(result);
    apply_style(&mut table);
    println!("{table}");

    if !result.raw_keywords.is_empty() {
        println!();
        println!("Suspicious keywords:");
        let mut keywords = Table::new();
        apply_style(&mut keywords);
        keywords.set_header(vec![header_cell("Keyword")]);
        for keyword in &result.raw_keywords {
            keywords.add_row(vec![Cell::new(keyword).fg(Color::Yellow)]);
        }
        println!("{keywords}");
    }

    if !result.structured_fields.is_empty() {
        println!();
        println!("Extracted transaction details:");
        let mut details = Table::new();
        apply_style(&mut details);
        details.set_header(vec![header_cell("Field"), header_cell("Value")]);
        for (name, value) in &result.structured_fields {
            details.add_row(vec![Cell::new(name), Cell::new(value)]);
        }
        println!("{details}");
    }

    if !result.evidence_text.is_empty() {
        println!();
        println!("Extracted text:");
        for line in result.evidence_text.lines() {
            println!("  | {line}");
        }
    }
}

/// Verdict, confidence, risk bucket, and method in one table.
fn summary_table(result: &AnalysisResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Verdict"), header_cell("Value")]);

    let verdict_color = match result.verdict {
        Verdict::Fraudulent => Color::Red,
        Verdict::Legitimate => Color::Green,
        Verdict::Unknown => Color::Yellow,
    };
    table.add_row(vec![
        Cell::new("Classification"),
        Cell::new(result.verdict.label())
            .fg(verdict_color)
            .add_attribute(Attribute::Bold),
    ]);

    if let Some(confidence) = result.confidence {
        table.add_row(vec![
            Cell::new("Confidence"),
            Cell::new(format!("{:.1}%", confidence * 100.0)),
        ]);
        // The risk label is derived from the score at render time; it is
        // never stored, so the two cannot disagree.
        let risk = RiskLevel::from_confidence(confidence);
        table.add_row(vec![
            Cell::new("Risk level"),
            Cell::new(risk.label()).fg(risk_color(risk)),
        ]);
    }

    table.add_row(vec![
        Cell::new("Detection method"),
        Cell::new(&result.method),
    ]);
    table
}

/// Render the error banner with its retry affordance.
pub fn print_failure(reason: &str) {
    eprintln!();
    eprintln!("  Analysis Failed");
    eprintln!("  {reason}");
    eprintln!("  Run the same command again to retry.");
}

/// Render per-field validation errors.
pub fn print_field_errors(errors: &ErrorMap) {
    eprintln!();
    eprintln!("  Please fix the following:");
    for error in errors.values() {
        eprintln!("  - {}: {}", error.field, error.message);
    }
}

/// Render feedback log stats: totals, per-category counts, recent entries.
pub fn print_feedback_stats(stats: &FeedbackStats) {
    println!();
    println!("Session feedback: {} total", stats.total);
    let mut categories: Vec<_> = stats.categories.iter().collect();
    categories.sort();
    for (category, count) in categories {
        println!("  {category}: {count}");
    }
    for entry in &stats.recent {
        println!("  #{} [{}] {}", entry.id, entry.category.label(), entry.name);
    }
}

/// Render the dashboard tile arrangement.
pub fn print_dashboard(arrangement: &[(String, String)]) {
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![header_cell("Slot"), header_cell("Tile")]);
    for (slot, item) in arrangement {
        table.add_row(vec![Cell::new(slot), Cell::new(item)]);
    }
    println!("{table}");
}

fn apply_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Minimal => Color::Green,
        RiskLevel::Low => Color::Blue,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::DarkYellow,
        RiskLevel::Critical => Color::Red,
    }
}
