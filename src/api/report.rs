use std::fmt::Write;

use crate::core::{Allocation, ShareComparison, ShareShift};

const BAR_WIDTH: usize = 30;
const RULE_WIDTH: usize = 88;

pub(super) fn render_report(allocation: &Allocation, comparisons: &[ShareComparison]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Tax Redistribution Results");
    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "{:<10} {:>12} {:>12} {:>10} {:>10} {:>10} {:>8}  {}",
        "Property", "Pre Value", "Post Value", "Pre Tax", "Post Tax", "Change", "% Chg", "Share"
    );
    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH));

    for (result, comparison) in allocation.results.iter().zip(comparisons) {
        let _ = writeln!(
            out,
            "{:<10} {:>12.0} {:>12.0} {:>10} {:>10} {:>+10} {:>7}%  {}",
            truncate(&result.label, 10),
            result.pre_value,
            result.post_value,
            result.pre_tax,
            result.post_tax,
            result.tax_change,
            result.percent_change,
            shift_label(comparison.shift),
        );
    }

    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "{:<10} {:>12.0} {:>12.0} {:>10} {:>10}",
        "Total",
        allocation.pre_total,
        allocation.post_total,
        allocation.pre_tax_total(),
        allocation.post_tax_total(),
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Mill rate before revaluation: {:.2}",
        allocation.mill_rate_pre
    );
    let _ = writeln!(
        out,
        "Mill rate after revaluation:  {:.2}",
        allocation.mill_rate_post
    );
    if let Some(first) = comparisons.first() {
        let _ = writeln!(
            out,
            "Grand list growth:            {:+.2}%",
            first.grand_list_growth_percent
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Tax Comparison Before and After");
    let max_tax = allocation
        .results
        .iter()
        .flat_map(|r| [r.pre_tax, r.post_tax])
        .max()
        .unwrap_or(0) as f64;
    for result in &allocation.results {
        let label = truncate(&result.label, 10);
        let _ = writeln!(
            out,
            "{:<10} pre  {} {}",
            label,
            format_bar(result.pre_tax as f64, max_tax, BAR_WIDTH),
            result.pre_tax
        );
        let _ = writeln!(
            out,
            "{:<10} post {} {}",
            "",
            format_bar(result.post_tax as f64, max_tax, BAR_WIDTH),
            result.post_tax
        );
    }

    out
}

fn shift_label(shift: ShareShift) -> &'static str {
    match shift {
        ShareShift::Increase => "up",
        ShareShift::Decrease => "down",
        ShareShift::Unchanged => "same",
    }
}

fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
