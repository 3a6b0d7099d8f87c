//! Table types.

use super::Inline;
use serde::{Deserialize, Serialize};

/// A pipe table. The first row is the header row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, header first
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row: one inline sequence per cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<Vec<Inline>>,
}

impl TableRow {
    /// Create a new row from cell contents.
    pub fn new(cells: Vec<Vec<Inline>>) -> Self {
        Self { cells }
    }

    /// Create a row of plain-text cells.
    pub fn from_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| vec![Inline::text(*t)]).collect())
    }

    /// Get plain text representation of the row (tab-separated).
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| super::inline::plain_text(cell))
            .collect::<Vec<_>>()
            .join("\t")
    }
}
