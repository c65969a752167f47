use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::{value_extent, ColorScheme};
use crate::data::filter::ViewRow;
use crate::data::view::{BarSeries, Heatmap};

const NO_DATA: &str = "Nothing to show. Adjust the range or pick another metric.";

/// Label for an integer axis position, blank between bars.
fn category_label(labels: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Metric bar chart (central panel)
// ---------------------------------------------------------------------------

/// One vertical bar per selected station row, coloured by value.
pub fn metric_bar_chart(ui: &mut Ui, series: &BarSeries, scheme: ColorScheme, show_labels: bool) {
    ui.strong(format!("{} by station", series.metric));

    let Some((min, max)) = value_extent(series.defined()) else {
        ui.label(NO_DATA);
        return;
    };

    let labels: Vec<String> = series.bars.iter().map(|(s, _)| s.clone()).collect();
    let bars: Vec<Bar> = series
        .bars
        .iter()
        .enumerate()
        .filter_map(|(i, (station, value))| {
            let v = (*value)?;
            Some(
                Bar::new(i as f64, v)
                    .name(station)
                    .fill(scheme.color_for(v, min, max))
                    .width(0.8),
            )
        })
        .collect();

    let label_points: Vec<(f64, f64)> = series
        .bars
        .iter()
        .enumerate()
        .filter_map(|(i, (_, v))| v.map(|v| (i as f64, v)))
        .collect();

    Plot::new("metric_bars")
        .height(280.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .y_axis_label(series.metric.clone())
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&series.metric));
            if show_labels {
                for (x, v) in label_points {
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, v), RichText::new(format!("{v:.1}")).small())
                            .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Ranking chart (right panel)
// ---------------------------------------------------------------------------

/// Horizontal bars in the order given; the last row is drawn at the top.
pub fn ranking_chart(
    ui: &mut Ui,
    id: &str,
    rows: &[ViewRow],
    value_label: &str,
    scheme: ColorScheme,
    show_labels: bool,
) {
    let displays: Vec<f64> = rows.iter().filter_map(|r| r.display).collect();
    let Some((min, max)) = value_extent(&displays) else {
        ui.label(NO_DATA);
        return;
    };

    let labels: Vec<String> = rows.iter().map(|r| r.station.clone()).collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let d = r.display?;
            Some(
                Bar::new(i as f64, d)
                    .name(&r.station)
                    .fill(scheme.color_for(d, min, max))
                    .width(0.7),
            )
        })
        .collect();

    Plot::new(id)
        .height(260.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_label(value_label.to_string())
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            if show_labels {
                for (i, r) in rows.iter().enumerate() {
                    let Some(d) = r.display else { continue };
                    // The label always shows the raw value, even when normalized.
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(d, i as f64),
                            RichText::new(format!(" {:.2}", r.value)).small(),
                        )
                        .anchor(Align2::LEFT_CENTER),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmap (central panel)
// ---------------------------------------------------------------------------

const CELL_HEIGHT: f32 = 18.0;
const ROW_LABEL_WIDTH: f32 = 90.0;
const HEADER_HEIGHT: f32 = 20.0;

/// Station × metric grid painted directly; one colour scale for every cell.
pub fn heatmap(ui: &mut Ui, heatmap: &Heatmap, scheme: ColorScheme) {
    ui.strong("Weather metrics by station");
    if heatmap.is_empty() {
        ui.label(NO_DATA);
        return;
    }

    let n_cols = heatmap.columns.len();
    let n_rows = heatmap.stations.len();
    let width = ui.available_width().max(ROW_LABEL_WIDTH + 40.0 * n_cols as f32);
    let height = HEADER_HEIGHT + CELL_HEIGHT * n_rows as f32;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
    let painter = ui.painter_at(rect);

    let cell_width = (width - ROW_LABEL_WIDTH) / n_cols as f32;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(11.0);
    let missing = Color32::from_gray(60);

    for (c, column) in heatmap.columns.iter().enumerate() {
        let x = rect.min.x + ROW_LABEL_WIDTH + (c as f32 + 0.5) * cell_width;
        painter.text(
            egui::pos2(x, rect.min.y + HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            column,
            font.clone(),
            text_color,
        );
    }

    for (r, station) in heatmap.stations.iter().enumerate() {
        let y = rect.min.y + HEADER_HEIGHT + r as f32 * CELL_HEIGHT;
        painter.text(
            egui::pos2(rect.min.x + ROW_LABEL_WIDTH - 4.0, y + CELL_HEIGHT / 2.0),
            Align2::RIGHT_CENTER,
            station,
            font.clone(),
            text_color,
        );

        for (c, value) in heatmap.cells[r].iter().enumerate() {
            let fill = match (value, heatmap.extent) {
                (Some(v), Some((min, max))) => scheme.color_for(*v, min, max),
                _ => missing,
            };
            let cell = egui::Rect::from_min_size(
                egui::pos2(rect.min.x + ROW_LABEL_WIDTH + c as f32 * cell_width, y),
                egui::vec2(cell_width - 1.0, CELL_HEIGHT - 1.0),
            );
            painter.rect_filled(cell, 0.0, fill);
        }
    }

    // Tooltip for the hovered cell.
    let hovered = response.hover_pos().and_then(|pos| {
        let c = ((pos.x - rect.min.x - ROW_LABEL_WIDTH) / cell_width).floor();
        let r = ((pos.y - rect.min.y - HEADER_HEIGHT) / CELL_HEIGHT).floor();
        if c < 0.0 || r < 0.0 {
            return None;
        }
        let (c, r) = (c as usize, r as usize);
        let value = heatmap.cells.get(r)?.get(c)?;
        let shown = value.map_or_else(|| "no data".to_string(), |v| format!("{v:.2}"));
        Some(format!("{}\n{}: {shown}", heatmap.stations[r], heatmap.columns[c]))
    });
    if let Some(text) = hovered {
        response.on_hover_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_only_on_integer_marks() {
        let labels = vec!["서울".to_string(), "부산".to_string()];
        assert_eq!(category_label(&labels, 1.0), "부산");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 5.0), "");
    }
}
