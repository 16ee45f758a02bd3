//! Plain-text rendering of the views

use crate::services::currency::format_currency;
use crate::services::table_view::render_rows;
use crate::types::{Aggregation, Bucket, DayBuckets, Table};

const EMPTY_MONTHLY: &str =
    "No data available for monthly totals. Try adding some entries first.";
const EMPTY_ORGANIZED: &str = "No data entries available. Try adding some entries first.";

fn entries_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", count)
    }
}

/// Year headers, with months listed under the open year.
///
/// `year` overrides the default-expanded year.
pub fn render_monthly(agg: &Aggregation<Bucket>, year: Option<&str>) -> String {
    if agg.is_empty() {
        return EMPTY_MONTHLY.to_string();
    }
    let expanded = year.or(agg.expanded_year.as_deref());
    let mut lines = Vec::new();

    for y in agg.calendar.years_desc() {
        lines.push(format!("{}  {}", y, format_currency(agg.calendar.year_total(y))));
        if expanded != Some(y) {
            continue;
        }
        for (month, bucket) in agg.calendar.months_desc(y) {
            lines.push(format!(
                "  {:<10} {:>14}  ({})",
                month,
                format_currency(bucket.total),
                entries_label(bucket.len())
            ));
        }
    }
    lines.join("\n")
}

/// Year headers; under the open year its months, and under the open month its days
pub fn render_organized(
    agg: &Aggregation<DayBuckets>,
    year: Option<&str>,
    month: Option<&str>,
) -> String {
    if agg.is_empty() {
        return EMPTY_ORGANIZED.to_string();
    }
    let expanded = year.or(agg.expanded_year.as_deref());
    let mut lines = Vec::new();

    for y in agg.calendar.years_desc() {
        lines.push(y.to_string());
        if expanded != Some(y) {
            continue;
        }
        for (m, days) in agg.calendar.months_desc(y) {
            lines.push(format!("  {}  ({})", m, entries_label(days.record_count())));
            if month != Some(m) {
                continue;
            }
            for (day, bucket) in days.days_desc() {
                lines.push(format!("    {} {}", m, day));
                for record in &bucket.records {
                    lines.push(format!(
                        "      {:<24} {:>14}",
                        record.name,
                        format_currency(record.amount_or_zero())
                    ));
                }
            }
        }
    }
    lines.join("\n")
}

/// Aligned table with a trailing amount total
pub fn render_table(table: &Table) -> String {
    let rows = render_rows(table);
    let widths: Vec<usize> = (0..rows.first().map_or(0, Vec::len))
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = vec![table.entry.name.clone()];
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        lines.push(cells.join("  ").trim_end().to_string());
    }
    lines.push(format!("Total: {}", format_currency(table.amount_total())));
    lines.join("\n")
}
