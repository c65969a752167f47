use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::{Selection, ViewRow};
use crate::data::summary::SummaryCard;
use crate::data::view::{DashboardView, MetricSection};
use crate::state::{AppState, RankingTab};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel – cards and charts
// ---------------------------------------------------------------------------

/// Render the central panel.
pub fn central_panel(ui: &mut Ui, view: Option<&DashboardView>, selection: &Selection) {
    let Some(view) = view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view station data  (File → Open…)");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Summary");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for card in &view.cards {
                    summary_card(ui, card);
                }
            });
            ui.separator();

            ui.heading("Charts");
            ui.label(
                RichText::new("A station map needs per-station coordinates; showing charts instead.")
                    .color(Color32::LIGHT_BLUE),
            );

            match &view.metric {
                Ok(section) => plot::metric_bar_chart(
                    ui,
                    &section.bars,
                    selection.color_scheme,
                    selection.show_labels,
                ),
                Err(e) => warning(ui, &e.to_string()),
            }
            ui.add_space(8.0);
            plot::heatmap(ui, &view.heatmap, selection.color_scheme);
        });
}

fn summary_card(ui: &mut Ui, card: &SummaryCard) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(130.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(card.label);
            ui.label(RichText::new(card.display_value()).size(24.0).strong());
            if let Some(date) = &card.date {
                ui.label(RichText::new(date).small().weak());
            }
        });
    });
}

fn warning(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(format!("⚠ {text}")).color(Color32::YELLOW));
}

// ---------------------------------------------------------------------------
// Right panel – rankings and about
// ---------------------------------------------------------------------------

/// Render the Top 10 / Bottom 10 / About tabs.
pub fn ranking_panel(ui: &mut Ui, state: &mut AppState, view: Option<&DashboardView>) {
    ui.heading("Top stations & About");

    let Some(view) = view else {
        return;
    };
    let section = match &view.metric {
        Ok(section) => section,
        Err(e) => {
            warning(ui, &e.to_string());
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.ranking_tab, RankingTab::Top, "Top 10");
        ui.selectable_value(&mut state.ranking_tab, RankingTab::Bottom, "Bottom 10");
        ui.selectable_value(&mut state.ranking_tab, RankingTab::About, "About");
    });
    ui.separator();

    let selection = state.selection();
    match state.ranking_tab {
        RankingTab::Top => ranking_tab(ui, "top_chart", "Top 10", &section.top, section, &selection),
        RankingTab::Bottom => {
            ranking_tab(ui, "bottom_chart", "Bottom 10", &section.bottom, section, &selection)
        }
        RankingTab::About => about(ui, section, &selection),
    }
}

fn ranking_tab(
    ui: &mut Ui,
    id: &str,
    title: &str,
    rows: &[ViewRow],
    section: &MetricSection,
    selection: &Selection,
) {
    if rows.is_empty() {
        ui.label("Nothing to show. Adjust the range or pick another metric.");
        return;
    }

    ui.strong(format!("{title} · {}", section.value_label));
    plot::ranking_chart(
        ui,
        id,
        rows,
        &section.value_label,
        selection.color_scheme,
        selection.show_labels,
    );
    ui.add_space(6.0);
    ranking_table(ui, rows, &section.view.metric);
}

/// Station and raw value, highest-ranked first.
fn ranking_table(ui: &mut Ui, rows: &[ViewRow], metric: &str) {
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Station");
            });
            header.col(|ui| {
                ui.strong(metric);
            });
        })
        .body(|mut body| {
            // Charts draw the last row on top, so the table reads in reverse.
            for r in rows.iter().rev() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&r.station);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", r.value));
                    });
                });
            }
        });
}

fn about(ui: &mut Ui, section: &MetricSection, selection: &Selection) {
    ui.strong("About this data");
    ui.label(format!("Metric: {}", section.view.metric));
    ui.label(format!(
        "Display value: {} (normalization {})",
        section.value_label,
        if selection.normalize { "ON" } else { "OFF" }
    ));
    ui.label(format!(
        "Value range: [{:.2}, {:.2}]",
        selection.range.lo, selection.range.hi
    ));
    ui.label(format!("Rows in range: {}", section.view.len()));
    ui.add_space(8.0);
    ui.strong("Tips");
    ui.label("• Changing metric, stations or range updates the rankings immediately.");
    ui.label("• Toggle bar labels with \"Show chart labels\".");
}
