use std::collections::BTreeSet;

use crate::color::ColorScheme;
use crate::error::DashboardError;

use super::coerce::coerce_column;
use super::model::WeatherTable;
use super::normalize::display_values;

// ---------------------------------------------------------------------------
// Selection: an immutable snapshot of the sidebar controls
// ---------------------------------------------------------------------------

/// Closed numeric interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub lo: f64,
    pub hi: f64,
}

impl ValueRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        ValueRange { lo, hi }
    }

    /// Accepts every finite value.
    pub fn unbounded() -> Self {
        ValueRange {
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        ValueRange::unbounded()
    }
}

/// Everything a render pass needs to know about the user's choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected stations. Empty means "all stations".
    pub stations: BTreeSet<String>,
    pub metric: String,
    pub range: ValueRange,
    pub color_scheme: ColorScheme,
    pub normalize: bool,
    pub show_labels: bool,
}

impl Selection {
    /// Select every station with no range restriction.
    pub fn all(metric: &str) -> Self {
        Selection {
            stations: BTreeSet::new(),
            metric: metric.to_string(),
            range: ValueRange::unbounded(),
            color_scheme: ColorScheme::default(),
            normalize: false,
            show_labels: true,
        }
    }
}

/// The stations a selection actually covers.
pub fn effective_stations(table: &WeatherTable, selected: &BTreeSet<String>) -> BTreeSet<String> {
    if selected.is_empty() {
        table.stations.iter().cloned().collect()
    } else {
        selected.clone()
    }
}

/// Indices of rows whose station is selected (rows without a station never match).
pub fn station_rows(table: &WeatherTable, selected: &BTreeSet<String>) -> Vec<usize> {
    let stations = effective_stations(table, selected);
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.station.as_ref().is_some_and(|s| stations.contains(s)))
        .map(|(i, _)| i)
        .collect()
}

/// Observed bounds of a metric over the whole table, widened outward to
/// two decimals so the extremes stay inside a slider built from them.
pub fn metric_bounds(table: &WeatherTable, metric: &str) -> Option<ValueRange> {
    let (lo, hi) = coerce_column(table, metric)
        .into_iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    // `x * 100.0` can round onto a whole number past `x`; never cut inside.
    let widen_lo = ((lo * 100.0).floor() / 100.0).min(lo);
    let widen_hi = ((hi * 100.0).ceil() / 100.0).max(hi);
    (lo <= hi).then(|| ValueRange::new(widen_lo, widen_hi))
}

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// One kept row of the derived view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    /// Index into the source table.
    pub row: usize,
    pub station: String,
    /// Coerced metric value.
    pub value: f64,
    /// Value that is plotted and ranked.
    pub display: Option<f64>,
}

/// Rows of the selected stations whose metric lies in the selected range.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub metric: String,
    pub normalized: bool,
    pub rows: Vec<ViewRow>,
}

impl DerivedView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Source-table indices of the kept rows.
    pub fn row_indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.row).collect()
    }
}

/// Filter by station, coerce the metric, drop missing and out-of-range
/// values, then attach the display column.
pub fn derive_view(table: &WeatherTable, selection: &Selection) -> Result<DerivedView, DashboardError> {
    if !table.has_column(&selection.metric) {
        return Err(DashboardError::MetricNotFound(selection.metric.clone()));
    }

    let values = coerce_column(table, &selection.metric);
    let kept: Vec<(usize, String, f64)> = station_rows(table, &selection.stations)
        .into_iter()
        .filter_map(|i| {
            let value = values[i].filter(|v| selection.range.contains(*v))?;
            let station = table.rows[i].station.clone()?;
            Some((i, station, value))
        })
        .collect();

    let raw: Vec<Option<f64>> = kept.iter().map(|(_, _, v)| Some(*v)).collect();
    let display = display_values(&raw, selection.normalize);

    let rows = kept
        .into_iter()
        .zip(display)
        .map(|((row, station, value), display)| ViewRow {
            row,
            station,
            value,
            display,
        })
        .collect();

    Ok(DerivedView {
        metric: selection.metric.clone(),
        normalized: selection.normalize,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    fn scenario() -> WeatherTable {
        table(&[
            (Some("A"), &[("m", "10")]),
            (Some("B"), &[("m", "1,000")]),
            (Some("C"), &[("m", "")]),
        ])
    }

    fn selection(range: ValueRange) -> Selection {
        Selection {
            range,
            ..Selection::all("m")
        }
    }

    #[test]
    fn missing_values_are_dropped() {
        let view = derive_view(&scenario(), &selection(ValueRange::new(0.0, 2000.0))).unwrap();
        let stations: Vec<_> = view.rows.iter().map(|r| r.station.as_str()).collect();
        assert_eq!(stations, vec!["A", "B"]);
        assert_eq!(view.rows[1].value, 1000.0);
        assert_eq!(view.rows[1].display, Some(1000.0));
    }

    #[test]
    fn range_is_inclusive() {
        let view = derive_view(&scenario(), &selection(ValueRange::new(10.0, 10.0))).unwrap();
        assert_eq!(view.row_indices(), vec![0]);

        let view = derive_view(&scenario(), &selection(ValueRange::new(2000.0, 3000.0))).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn empty_station_selection_means_all() {
        let t = scenario();
        let all = effective_stations(&t, &BTreeSet::new());
        assert_eq!(all.len(), 3);
        assert_eq!(station_rows(&t, &BTreeSet::new()), vec![0, 1, 2]);
    }

    #[test]
    fn station_filter_keeps_row_order() {
        let t = table(&[
            (Some("B"), &[("m", "1")]),
            (None, &[("m", "2")]),
            (Some("A"), &[("m", "3")]),
            (Some("B"), &[("m", "4")]),
        ]);
        let selected: BTreeSet<String> = ["B".to_string()].into();
        assert_eq!(station_rows(&t, &selected), vec![0, 3]);
        // Null stations are outside the universe even when everything is selected.
        assert_eq!(station_rows(&t, &BTreeSet::new()), vec![0, 2, 3]);
    }

    #[test]
    fn unknown_metric_is_reported() {
        let err = derive_view(&scenario(), &Selection::all("nope")).unwrap_err();
        assert_eq!(err, DashboardError::MetricNotFound("nope".into()));
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = table(&[
            (Some("A"), &[("m", "5")]),
            (Some("B"), &[("m", "50")]),
            (Some("C"), &[("m", "1,500")]),
            (Some("D"), &[("m", "x")]),
        ]);
        let sel = Selection {
            stations: ["A".to_string(), "B".to_string(), "C".to_string()].into(),
            ..selection(ValueRange::new(0.0, 100.0))
        };
        let first = derive_view(&t, &sel).unwrap();
        let narrowed = t.select_rows(&first.row_indices());
        let second = derive_view(&narrowed, &sel).unwrap();

        let pairs = |v: &DerivedView| -> Vec<(String, f64)> {
            v.rows.iter().map(|r| (r.station.clone(), r.value)).collect()
        };
        assert_eq!(pairs(&first), pairs(&second));
        assert_eq!(second.row_indices(), vec![0, 1]);
    }

    #[test]
    fn normalized_display_spans_unit_interval() {
        let sel = Selection {
            normalize: true,
            ..selection(ValueRange::new(0.0, 2000.0))
        };
        let view = derive_view(&scenario(), &sel).unwrap();
        let display: Vec<_> = view.rows.iter().map(|r| r.display).collect();
        assert_eq!(display, vec![Some(0.0), Some(1.0)]);
        assert!(view.normalized);
    }

    #[test]
    fn bounds_widen_to_two_decimals() {
        let t = table(&[(Some("A"), &[("m", "-3.456")]), (Some("B"), &[("m", "12.341")])]);
        let bounds = metric_bounds(&t, "m").unwrap();
        assert_eq!(bounds, ValueRange::new(-3.46, 12.35));
        assert!(bounds.contains(-3.456) && bounds.contains(12.341));

        let empty = table(&[(Some("A"), &[("m", "")])]);
        assert_eq!(metric_bounds(&empty, "m"), None);
    }

    #[test]
    fn default_bounds_keep_inexact_extremes() {
        // Sums like this land a hair below their two-decimal neighbour.
        let coldest = -18.8 + 1.9 * 1.5;
        let raw = coldest.to_string();
        let t = table(&[
            (Some("A"), &[("m", raw.as_str())]),
            (Some("B"), &[("m", "0")]),
        ]);
        let bounds = metric_bounds(&t, "m").unwrap();
        assert!(bounds.contains(coldest) && bounds.contains(0.0));

        let view = derive_view(&t, &selection(bounds)).unwrap();
        assert_eq!(view.row_indices(), vec![0, 1]);
    }
}
