use crate::error::DashboardError;

use super::coerce::{coerce_cell, coerce_column};
use super::filter::{derive_view, station_rows, DerivedView, Selection, ViewRow};
use super::model::WeatherTable;
use super::rank::{bottom_k, top_k, RANK_SIZE};
use super::schema::HEATMAP_COLUMNS;
use super::summary::{summary_cards, SummaryCard};

// ---------------------------------------------------------------------------
// Chart inputs
// ---------------------------------------------------------------------------

/// One bar per selected-station row, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub metric: String,
    pub bars: Vec<(String, Option<f64>)>,
}

impl BarSeries {
    pub fn defined(&self) -> impl Iterator<Item = &f64> {
        self.bars.iter().filter_map(|(_, v)| v.as_ref())
    }
}

/// Station × metric grid with one colour range shared by every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub columns: Vec<String>,
    pub stations: Vec<String>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<Option<f64>>>,
    pub extent: Option<(f64, f64)>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.stations.is_empty()
    }
}

/// Everything that depends on the selected metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSection {
    pub bars: BarSeries,
    pub view: DerivedView,
    /// Ascending by display value.
    pub top: Vec<ViewRow>,
    /// Descending by display value.
    pub bottom: Vec<ViewRow>,
    /// Axis label for the display value.
    pub value_label: String,
}

/// The result of one render pass over the table.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<SummaryCard>,
    pub heatmap: Heatmap,
    pub metric: Result<MetricSection, DashboardError>,
}

impl DashboardView {
    /// Recompute every derived value from scratch.
    pub fn compute(table: &WeatherTable, selection: &Selection) -> Self {
        let rows = station_rows(table, &selection.stations);
        let metric = metric_section(table, selection, &rows);
        if let Err(e) = &metric {
            log::warn!("{e}");
        }
        log::debug!(
            "view recomputed: {} station rows, metric '{}'",
            rows.len(),
            selection.metric
        );

        DashboardView {
            cards: summary_cards(table),
            heatmap: heatmap(table, &rows),
            metric,
        }
    }
}

fn metric_section(
    table: &WeatherTable,
    selection: &Selection,
    rows: &[usize],
) -> Result<MetricSection, DashboardError> {
    let view = derive_view(table, selection)?;

    let values = coerce_column(table, &selection.metric);
    let bars = rows
        .iter()
        .map(|&i| (station_label(table, i), values[i]))
        .collect();

    let value_label = if selection.normalize {
        "Normalized value".to_string()
    } else {
        selection.metric.clone()
    };

    Ok(MetricSection {
        bars: BarSeries {
            metric: selection.metric.clone(),
            bars,
        },
        top: top_k(&view.rows, RANK_SIZE),
        bottom: bottom_k(&view.rows, RANK_SIZE),
        view,
        value_label,
    })
}

fn heatmap(table: &WeatherTable, rows: &[usize]) -> Heatmap {
    let columns: Vec<String> = HEATMAP_COLUMNS
        .iter()
        .filter(|c| table.has_column(c))
        .map(|c| c.to_string())
        .collect();

    let cells: Vec<Vec<Option<f64>>> = rows
        .iter()
        .map(|&i| {
            columns
                .iter()
                .map(|c| coerce_cell(table.rows[i].cell(c)))
                .collect()
        })
        .collect();

    let extent = crate::color::value_extent(cells.iter().flatten().flatten());

    Heatmap {
        stations: rows.iter().map(|&i| station_label(table, i)).collect(),
        columns,
        cells,
        extent,
    }
}

fn station_label(table: &WeatherTable, row: usize) -> String {
    table.rows[row].station.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::ValueRange;
    use crate::data::schema::{AVG_TEMP, AVG_WIND, MAX_TEMP};
    use crate::data::model::tests::table;

    fn sample() -> WeatherTable {
        table(&[
            (Some("A"), &[(AVG_TEMP, "10"), (MAX_TEMP, "30"), (AVG_WIND, "1.5")]),
            (Some("B"), &[(AVG_TEMP, "1,000"), (MAX_TEMP, "31"), (AVG_WIND, "")]),
            (Some("C"), &[(AVG_TEMP, ""), (MAX_TEMP, "29"), (AVG_WIND, "2.5")]),
        ])
    }

    #[test]
    fn scenario_from_three_stations() {
        let t = sample();
        let sel = Selection {
            range: ValueRange::new(0.0, 2000.0),
            ..Selection::all(AVG_TEMP)
        };
        let dash = DashboardView::compute(&t, &sel);

        assert_eq!(dash.cards[0].value, Some(505.0));
        let section = dash.metric.unwrap();
        assert_eq!(section.view.len(), 2);
        assert_eq!(section.top.last().map(|r| r.station.as_str()), Some("B"));
        assert_eq!(top_k(&section.view.rows, 1)[0].station, "B");
        // Bars are not range-filtered; C shows up with no value.
        assert_eq!(section.bars.bars.len(), 3);
        assert_eq!(section.bars.bars[2], ("C".to_string(), None));
        assert_eq!(section.value_label, AVG_TEMP);
    }

    #[test]
    fn missing_metric_still_renders_cards_and_heatmap() {
        let t = sample();
        let dash = DashboardView::compute(&t, &Selection::all("합계일조시간 (hr)"));
        assert!(matches!(dash.metric, Err(DashboardError::MetricNotFound(_))));
        assert_eq!(dash.cards.len(), 5);
        assert!(!dash.heatmap.is_empty());
    }

    #[test]
    fn heatmap_uses_present_columns_and_selected_stations() {
        let t = sample();
        let sel = Selection {
            stations: BTreeSet::from(["A".to_string(), "C".to_string()]),
            ..Selection::all(AVG_TEMP)
        };
        let dash = DashboardView::compute(&t, &sel);
        let hm = dash.heatmap;
        assert_eq!(hm.columns, vec![AVG_TEMP.to_string(), MAX_TEMP.to_string(), AVG_WIND.to_string()]);
        assert_eq!(hm.stations, vec!["A".to_string(), "C".to_string()]);
        assert_eq!(hm.cells[1], vec![None, Some(29.0), Some(2.5)]);
        assert_eq!(hm.extent, Some((1.5, 30.0)));
    }

    #[test]
    fn normalized_label() {
        let sel = Selection {
            normalize: true,
            ..Selection::all(AVG_TEMP)
        };
        let section = DashboardView::compute(&sample(), &sel).metric.unwrap();
        assert_eq!(section.value_label, "Normalized value");
        assert_eq!(section.top.last().and_then(|r| r.display), Some(1.0));
        assert_eq!(section.bottom.last().and_then(|r| r.display), Some(0.0));
    }
}
