//! Formatting helpers shared by the renderers

use crate::reports::ChartSeries;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Horizontal bar chart of a series, one row per point, bars scaled to the
/// largest value
pub fn format_bar_chart(series: &ChartSeries, width: usize, currency_symbol: &str) -> Vec<String> {
    let max = series.max_value().as_f64();
    let label_width = series
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    series
        .points()
        .map(|(label, value)| {
            format!(
                "{:<label_width$}  {} {}",
                label,
                format_bar(value.as_f64(), max, width),
                value.format_with_symbol(currency_symbol),
                label_width = label_width
            )
        })
        .collect()
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
