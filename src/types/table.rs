//! User-defined tables attached to a data entry

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Amount,
    Date,
}

impl ColumnType {
    pub const ALL: [ColumnType; 4] = [Self::Text, Self::Number, Self::Amount, Self::Date];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Amount => "amount",
            Self::Date => "date",
        }
    }

    /// Number and amount columns take a decimal keypad
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub order: i64,
}

/// Stored cell content; the backend keeps numbers and strings side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric reading of the cell, `None` when the text is not a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse().ok()
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    /// column id -> value; `None` for cells stored as null
    #[serde(default)]
    pub cells: HashMap<String, Option<CellValue>>,
}

impl TableRow {
    pub fn cell(&self, column_id: &str) -> Option<&CellValue> {
        self.cells.get(column_id).and_then(Option::as_ref)
    }
}

/// A data entry together with its columns and rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub entry: Record,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Columns in display order
    pub fn ordered_columns(&self) -> Vec<&TableColumn> {
        let mut columns: Vec<&TableColumn> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    /// Order value for a column appended at the end
    pub fn next_column_order(&self) -> i64 {
        self.columns.iter().map(|c| c.order).fold(0, i64::max) + 1
    }

    /// First date-typed column, the one rows are dated by
    pub fn date_column(&self) -> Option<&TableColumn> {
        self.columns
            .iter()
            .find(|c| c.column_type == ColumnType::Date)
    }

    /// Sum of every amount cell; non-numeric cells count as zero
    pub fn amount_total(&self) -> f64 {
        let amount_ids: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| c.column_type == ColumnType::Amount)
            .map(|c| c.id.as_str())
            .collect();

        self.rows
            .iter()
            .flat_map(|row| amount_ids.iter().filter_map(|id| row.cell(id)))
            .map(|cell| cell.as_number().unwrap_or(0.0))
            .sum()
    }

    pub fn row(&self, row_id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.id == row_id)
    }
}
