use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the observation table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Numeric-looking text with thousands separators
/// (`"1,234"`) stays `Text` until coerced by [`super::coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            // Whole numbers (e.g. dates stored as 20230801) print without decimals.
            CellValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Classify a raw text field the way a CSV reader would.
    pub fn from_raw(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            Ok(_) => CellValue::Null,
            Err(_) => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the table
// ---------------------------------------------------------------------------

/// A single row: one station's readings.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Station identifier; `None` when the source cell was empty.
    pub station: Option<String>,
    /// Metric and date cells keyed by column name (station column excluded).
    pub cells: BTreeMap<String, CellValue>,
}

impl Observation {
    pub fn cell(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// WeatherTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherTable {
    /// Rows in file order.
    pub rows: Vec<Observation>,
    /// Column names in file order, station column excluded.
    pub columns: Vec<String>,
    /// Sorted unique non-null station identifiers.
    pub stations: Vec<String>,
}

impl WeatherTable {
    /// Build the station universe from the loaded rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Observation>) -> Self {
        let stations: BTreeSet<String> = rows
            .iter()
            .filter_map(|r| r.station.clone())
            .collect();
        WeatherTable {
            rows,
            columns,
            stations: stations.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Cells of one column in row order (`Null` where a row lacks it).
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().map(move |r| r.cell(column))
    }

    /// Copy of the table restricted to `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> WeatherTable {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        WeatherTable::from_rows(self.columns.clone(), rows)
    }
}
