use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorScheme;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Weather Dashboard");
    ui.label(RichText::new("Compare weather metrics across stations.").weak());
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let all_stations = dataset.stations.clone();
    let groups = state.groups.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Stations ----
            let header = format!("Stations  ({}/{})", state.stations.len(), all_stations.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("stations")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none();
                        }
                    });

                    ScrollArea::vertical()
                        .id_salt("station_list")
                        .max_height(220.0)
                        .show(ui, |ui: &mut Ui| {
                            for station in &all_stations {
                                let mut checked = state.stations.contains(station);
                                if ui.checkbox(&mut checked, station).changed() {
                                    state.toggle_station(station);
                                }
                            }
                        });
                });

            if state.stations.is_empty() {
                ui.label(
                    RichText::new("No station selected: using every station.")
                        .color(Color32::LIGHT_BLUE),
                );
            }
            ui.separator();

            // ---- Metric ----
            ui.strong("Metric category");
            for (i, group) in groups.iter().enumerate() {
                if ui.radio(state.group == i, &group.name).clicked() && state.group != i {
                    state.set_group(i);
                }
            }

            ui.add_space(4.0);
            ui.strong("Metric");
            let columns = groups
                .get(state.group)
                .map(|g| g.columns.clone())
                .unwrap_or_default();
            egui::ComboBox::from_id_salt("metric")
                .selected_text(&state.metric)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui.selectable_label(state.metric == *col, col).clicked()
                            && state.metric != *col
                        {
                            state.set_metric(col.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Value range ----
            ui.strong("Value range");
            match state.bounds {
                Some(bounds) => {
                    let mut lo = state.range.lo;
                    let mut hi = state.range.hi;
                    let lo_changed = ui
                        .add(egui::Slider::new(&mut lo, bounds.lo..=bounds.hi).text("min").fixed_decimals(2))
                        .changed();
                    let hi_changed = ui
                        .add(egui::Slider::new(&mut hi, bounds.lo..=bounds.hi).text("max").fixed_decimals(2))
                        .changed();
                    if lo_changed {
                        state.set_range_lo(lo);
                    }
                    if hi_changed {
                        state.set_range_hi(hi);
                    }
                }
                None => {
                    ui.label(RichText::new("No numeric values for this metric.").weak());
                }
            }
            ui.separator();

            // ---- Style ----
            ui.strong("Color scale");
            egui::ComboBox::from_id_salt("color_scheme")
                .selected_text(state.color_scheme.name())
                .show_ui(ui, |ui: &mut Ui| {
                    for scheme in ColorScheme::ALL {
                        ui.selectable_value(&mut state.color_scheme, scheme, scheme.name());
                    }
                });
            ui.checkbox(&mut state.normalize, "Normalize values (0–1)");
            ui.checkbox(&mut state.show_labels, "Show chart labels");

            ui.separator();
            ui.label(
                RichText::new("Changing the metric updates the charts, rankings and cards together.")
                    .small()
                    .weak(),
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}: {} rows, {} stations",
                ds.len(),
                ds.stations.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open weather data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset, path),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
