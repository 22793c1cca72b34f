use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct SheetColumn {
    pub header: String,
    /// Column width in spreadsheet character units.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Amount kept numeric for spreadsheet formats, with the display string
    /// used by text-only formats.
    Amount { value: Decimal, display: String },
}

/// A rectangular table: a header row derived from `columns`, followed by
/// `rows`. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<SheetColumn>,
    pub rows: Vec<Vec<Cell>>,
}

// --

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn display(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Amount { display, .. } => display,
        }
    }
}

impl Sheet {
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Number of rows including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
