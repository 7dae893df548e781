//! Terminal text summary.
//!
//! Renders the ranked events as a table and the destruction series as an
//! ASCII bar chart, for `analyze --summary`.

use crate::parser::schema::{DatedValue, RankedEntry};

const BAR_WIDTH: usize = 50;

/// Generate a text summary of the analysis
///
/// **Public** - main entry point for terminal output
///
/// # Arguments
/// * `top_events` - Ranked short-list
/// * `series` - Destruction by date, in table order
/// * `max_bars` - Largest bars to draw in the chart
pub fn generate_text_summary(
    top_events: &[RankedEntry],
    series: &[DatedValue],
    max_bars: usize,
) -> String {
    let mut lines = Vec::new();

    lines.extend(render_ranked_table(top_events));
    lines.push(String::new());
    lines.extend(render_destruction_chart(series, max_bars));

    lines.join("\n")
}

/// Render the ranked events table
fn render_ranked_table(top_events: &[RankedEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    let rule = format!(
        "  {}",
        "━".repeat(4 + 12 + 10 + 10 + 12 + 12 + 18 + 20)
    );

    lines.push("  MOST SEVERE EVENTS".to_string());
    lines.push(rule.clone());
    lines.push(format!(
        "  {:>3} {:<11} {:>9} {:>9} {:>11} {:>11} {:>17} {:>19}",
        "#", "DATE", "DEATHS", "INJURED", "DISPLACED", "HOMELESS", "PEOPLE AFFECTED", "DESTRUCTION"
    ));
    lines.push(rule.clone());

    if top_events.is_empty() {
        lines.push("  (no records)".to_string());
    }

    for entry in top_events {
        let people = entry.event.people();
        lines.push(format!(
            "  {:>3} {:<11} {:>9} {:>9} {:>11} {:>11} {:>17} {:>19.2}",
            entry.rank,
            format_date(entry.date()),
            people.deaths,
            people.injured,
            people.displaced,
            people.homeless,
            entry.event.total_people_affected,
            entry.event.total_destruction_value
        ));
    }

    lines.push(rule);
    lines
}

/// Render destruction by date as horizontal bars scaled to the largest value
fn render_destruction_chart(series: &[DatedValue], max_bars: usize) -> Vec<String> {
    let mut lines = vec!["  TOTAL DESTRUCTION BY DATE".to_string()];

    let max = series.iter().map(|p| p.value).fold(0.0, f64::max);
    if max <= 0.0 {
        lines.push("  (no destruction recorded)".to_string());
        return lines;
    }

    let mut points: Vec<(usize, &DatedValue)> = series
        .iter()
        .enumerate()
        .filter(|(_, p)| p.value > 0.0)
        .collect();
    let hidden = points.len().saturating_sub(max_bars);
    if hidden > 0 {
        // Keep the largest bars, then restore table order
        points.sort_by(|(_, a), (_, b)| {
            b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal)
        });
        points.truncate(max_bars);
        points.sort_by_key(|(idx, _)| *idx);
    }

    for (_, point) in points {
        let width = ((point.value / max) * BAR_WIDTH as f64).round() as usize;
        lines.push(format!(
            "  {:<11} {:<width$} {:>16.2}",
            format_date(point.date),
            "█".repeat(width.max(1)),
            point.value,
            width = BAR_WIDTH
        ));
    }

    if hidden > 0 {
        lines.push(format!("   ({} smaller entries not shown)", hidden));
    }

    lines
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
