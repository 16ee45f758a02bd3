//! Display helpers for data-entry tables

use chrono::NaiveDate;

use crate::services::currency::format_amount;
use crate::services::normalizer::normalize;
use crate::types::{CellValue, ColumnType, RawTimestamp, Table};

/// Render a stored cell the way its column type reads on screen
pub fn format_cell_value(cell: Option<&CellValue>, column_type: ColumnType) -> String {
    let Some(cell) = cell else {
        return String::new();
    };

    match column_type {
        ColumnType::Number => cell
            .as_number()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "NaN".to_string()),
        ColumnType::Amount => format_amount(cell.as_number().unwrap_or(f64::NAN)),
        ColumnType::Date => cell_date(cell)
            .map(|date| date.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| "Invalid Date".to_string()),
        ColumnType::Text => match cell {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        },
    }
}

/// Input hint shown in an empty cell editor
pub fn placeholder(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Text => "Enter text (e.g. Product Name)",
        ColumnType::Number => "Enter number (e.g. 42)",
        ColumnType::Amount => "Enter amount (e.g. 99.99)",
        ColumnType::Date => "YYYY-MM-DD (e.g. 2025-05-15)",
    }
}

/// Calendar date held by a cell, if it reads as one
pub fn cell_date(cell: &CellValue) -> Option<NaiveDate> {
    let raw = match cell {
        CellValue::Number(ms) => RawTimestamp::Millis(*ms),
        CellValue::Text(s) => RawTimestamp::Text(s.clone()),
    };
    normalize(&raw).ok().map(|resolved| resolved.date)
}

/// Date of a row, read from the table's first date column
pub fn row_date(table: &Table, row_id: &str) -> Option<NaiveDate> {
    let column = table.date_column()?;
    let row = table.row(row_id)?;
    cell_date(row.cell(&column.id)?)
}

/// Header plus one line of formatted cells per row, columns in display order
pub fn render_rows(table: &Table) -> Vec<Vec<String>> {
    let columns = table.ordered_columns();

    let header: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(header);

    for row in &table.rows {
        lines.push(
            columns
                .iter()
                .map(|c| format_cell_value(row.cell(&c.id), c.column_type))
                .collect(),
        );
    }
    lines
}
