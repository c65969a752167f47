use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::color::ColorScheme;
use crate::data::filter::{metric_bounds, Selection, ValueRange};
use crate::data::model::WeatherTable;
use crate::data::schema::{metric_groups, MetricGroup};

/// Stations pre-selected when a dataset is loaded.
const DEFAULT_STATION_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which tab of the ranking panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingTab {
    #[default]
    Top,
    Bottom,
    About,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<WeatherTable>,

    /// Where `dataset` came from.
    pub source: Option<PathBuf>,

    /// Metric categories pruned to the loaded columns.
    pub groups: Vec<MetricGroup>,

    /// Index into `groups`.
    pub group: usize,

    /// Selected metric column.
    pub metric: String,

    /// Observed bounds of `metric`, used by the range sliders.
    pub bounds: Option<ValueRange>,

    /// Stations ticked in the sidebar. Empty means "all".
    pub stations: BTreeSet<String>,

    pub range: ValueRange,
    pub color_scheme: ColorScheme,
    pub normalize: bool,
    pub show_labels: bool,

    pub ranking_tab: RankingTab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// State for a freshly loaded dataset.
    pub fn with_dataset(dataset: WeatherTable, source: PathBuf) -> Self {
        let mut state = AppState::default();
        state.set_dataset(dataset, source);
        state
    }

    /// Ingest a newly loaded dataset and reset every control to its default.
    pub fn set_dataset(&mut self, dataset: WeatherTable, source: PathBuf) {
        self.groups = metric_groups(&dataset);
        self.stations = dataset
            .stations
            .iter()
            .take(DEFAULT_STATION_COUNT)
            .cloned()
            .collect();
        self.color_scheme = ColorScheme::default();
        self.normalize = false;
        self.show_labels = true;
        self.ranking_tab = RankingTab::default();
        self.dataset = Some(dataset);
        self.source = Some(source);
        self.status_message = None;
        self.set_group(0);
    }

    /// Switch category and select its first metric.
    pub fn set_group(&mut self, group: usize) {
        self.group = group;
        let metric = self
            .groups
            .get(group)
            .and_then(|g| g.columns.first())
            .cloned()
            .unwrap_or_default();
        self.set_metric(metric);
    }

    /// Select a metric and reset the range to its observed bounds.
    pub fn set_metric(&mut self, metric: String) {
        self.bounds = self
            .dataset
            .as_ref()
            .and_then(|ds| metric_bounds(ds, &metric));
        self.range = self.bounds.unwrap_or_else(ValueRange::unbounded);
        self.metric = metric;
    }

    /// Move the lower handle, never past the upper one.
    pub fn set_range_lo(&mut self, lo: f64) {
        self.range.lo = lo.min(self.range.hi);
    }

    /// Move the upper handle, never below the lower one.
    pub fn set_range_hi(&mut self, hi: f64) {
        self.range.hi = hi.max(self.range.lo);
    }

    /// Toggle a single station.
    pub fn toggle_station(&mut self, station: &str) {
        if !self.stations.remove(station) {
            self.stations.insert(station.to_string());
        }
    }

    /// Tick every station.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.stations = ds.stations.iter().cloned().collect();
        }
    }

    /// Untick every station, which the pipeline reads as "all stations".
    pub fn select_none(&mut self) {
        self.stations.clear();
    }

    /// Snapshot the controls for this render pass.
    pub fn selection(&self) -> Selection {
        Selection {
            stations: self.stations.clone(),
            metric: self.metric.clone(),
            range: self.range,
            color_scheme: self.color_scheme,
            normalize: self.normalize,
            show_labels: self.show_labels,
        }
    }
}
