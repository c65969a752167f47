use super::coerce::coerce_column;
use super::model::WeatherTable;
use super::schema::{
    AVG_TEMP, AVG_WIND, MAX_TEMP, MAX_TEMP_DATE, MIN_TEMP, MIN_TEMP_DATE, TOTAL_PRECIP,
};

// ---------------------------------------------------------------------------
// Column statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean of the defined values; `None` when nothing is defined.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// An extreme value and the row it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub row: usize,
    pub value: f64,
    /// The auxiliary date cell of `row`, if present.
    pub date: Option<String>,
}

/// Index and value of the largest defined entry; first occurrence wins ties.
pub fn arg_max(values: &[Option<f64>]) -> Option<(usize, f64)> {
    arg_extreme(values, |candidate, best| candidate > best)
}

/// Index and value of the smallest defined entry; first occurrence wins ties.
pub fn arg_min(values: &[Option<f64>]) -> Option<(usize, f64)> {
    arg_extreme(values, |candidate, best| candidate < best)
}

fn arg_extreme(values: &[Option<f64>], better: impl Fn(f64, f64) -> bool) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if !better(v, b) => best,
            _ => Some((i, v)),
        })
}

/// Maximum of `column` with the `date_column` cell of the same row.
pub fn max_with_date(table: &WeatherTable, column: &str, date_column: &str) -> Option<Extreme> {
    let values = coerce_column(table, column);
    arg_max(&values).map(|(row, value)| extreme(table, row, value, date_column))
}

/// Minimum of `column` with the `date_column` cell of the same row.
pub fn min_with_date(table: &WeatherTable, column: &str, date_column: &str) -> Option<Extreme> {
    let values = coerce_column(table, column);
    arg_min(&values).map(|(row, value)| extreme(table, row, value, date_column))
}

fn extreme(table: &WeatherTable, row: usize, value: f64, date_column: &str) -> Extreme {
    let date = table.rows[row].cell(date_column);
    Extreme {
        row,
        value,
        date: (!date.is_null()).then(|| date.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

/// One headline number.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub label: &'static str,
    /// `None` renders as "no data".
    pub value: Option<f64>,
    /// Date shown under the value for max/min cards.
    pub date: Option<String>,
}

impl SummaryCard {
    fn mean(table: &WeatherTable, label: &'static str, column: &'static str) -> Self {
        SummaryCard {
            label,
            value: mean(&coerce_column(table, column)),
            date: None,
        }
    }

    fn extreme(label: &'static str, found: Option<Extreme>) -> Self {
        SummaryCard {
            label,
            value: found.as_ref().map(|e| e.value),
            date: found.and_then(|e| e.date),
        }
    }

    /// Value formatted with one decimal, or "no data".
    pub fn display_value(&self) -> String {
        match self.value {
            Some(v) => format!("{v:.1}"),
            None => "no data".to_string(),
        }
    }
}

/// The headline cards. Depends only on the full table, never on the selection.
pub fn summary_cards(table: &WeatherTable) -> Vec<SummaryCard> {
    vec![
        SummaryCard::mean(table, AVG_TEMP, AVG_TEMP),
        SummaryCard::extreme(MAX_TEMP, max_with_date(table, MAX_TEMP, MAX_TEMP_DATE)),
        SummaryCard::extreme(MIN_TEMP, min_with_date(table, MIN_TEMP, MIN_TEMP_DATE)),
        SummaryCard::mean(table, "평균강수량 (mm)", TOTAL_PRECIP),
        SummaryCard::mean(table, AVG_WIND, AVG_WIND),
    ]
}
