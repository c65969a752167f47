use super::model::{CellValue, WeatherTable};

/// Thousands separator used by the source tables.
const THOUSANDS_SEPARATOR: char = ',';

/// Parse a locale-formatted number such as `"1,234.5"`.
///
/// Returns `None` for anything that is not a finite number once the
/// separators are removed.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|&c| c != THOUSANDS_SEPARATOR)
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce one cell to a number; `None` marks a missing value.
pub fn coerce_cell(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(v) if v.is_finite() => Some(*v),
        CellValue::Number(_) | CellValue::Null => None,
        CellValue::Text(s) => parse_number(s),
    }
}

/// Coerce a whole column, one entry per table row.
pub fn coerce_column(table: &WeatherTable, column: &str) -> Vec<Option<f64>> {
    table.column(column).map(coerce_cell).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    #[test]
    fn separators_are_stripped() {
        assert_eq!(parse_number("1,000"), Some(1000.0));
        assert_eq!(parse_number("12,345.75"), Some(12345.75));
        assert_eq!(parse_number(" -1,234 "), Some(-1234.0));
        for s in ["1,234", "987,654,321.5", "0.25"] {
            assert_eq!(parse_number(s), s.replace(',', "").parse::<f64>().ok());
        }
    }

    #[test]
    fn garbage_is_missing() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number(","), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("12a"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn typed_cells_pass_through() {
        assert_eq!(coerce_cell(&CellValue::Number(3.5)), Some(3.5));
        assert_eq!(coerce_cell(&CellValue::Number(f64::NAN)), None);
        assert_eq!(coerce_cell(&CellValue::Null), None);
        assert_eq!(coerce_cell(&CellValue::Text("2,5".into())), Some(25.0));
    }

    #[test]
    fn column_keeps_length() {
        let t = table(&[
            (Some("A"), &[("m", "10")]),
            (Some("B"), &[("m", "1,000")]),
            (Some("C"), &[("m", "")]),
        ]);
        assert_eq!(coerce_column(&t, "m"), vec![Some(10.0), Some(1000.0), None]);
        assert_eq!(coerce_column(&t, "absent"), vec![None, None, None]);
    }
}
