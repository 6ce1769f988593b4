use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::plot::export;
use crate::state::{AppState, Selection};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Samples");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No library loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let columns = table.metadata().columns().to_vec();
    let unique: Vec<_> = columns
        .iter()
        .map(|c| table.metadata().unique_values(c))
        .collect();

    let mut result = None;

    // ---- All rows vs. explicit rows ----
    let show_all = state.selection == Selection::All;
    ui.horizontal(|ui: &mut Ui| {
        if ui.selectable_label(show_all, "All").clicked() && !show_all {
            result = Some(state.set_selection(Selection::All));
        }
        if ui.selectable_label(!show_all, "Rows").clicked() && show_all {
            result = Some(state.apply_index_text());
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        let edit = ui.add(
            egui::TextEdit::singleline(&mut state.index_text)
                .hint_text("e.g. 1, 10, 20")
                .desired_width(140.0),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Plot").clicked() || submitted {
            result = Some(state.apply_index_text());
        }
    });
    ui.separator();

    // ---- Per-column metadata filters (collapsible) ----
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Filter by metadata");
        if ui.small_button("Apply").clicked() {
            result = Some(state.apply_filters());
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, all_values) in columns.iter().zip(&unique) {
                let n_selected = state.filters.get(col).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{col}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .filters
                                .get(col)
                                .is_some_and(|s| s.contains(val));
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
        });

    if let Some(result) = result {
        state.report(result);
    }
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
            let has_plot = state.plot.is_some();
            if ui
                .add_enabled(has_plot, egui::Button::new("Export image…"))
                .clicked()
            {
                export_image_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_plot, egui::Button::new("Export long table…"))
                .clicked()
            {
                export_long_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} samples, {} wavelengths, {} metadata columns",
                table.n_samples(),
                table.wavelength().len(),
                table.metadata().n_cols()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open spectral library")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let result = state.open(&path, Selection::All);
        state.report(result);
    }
}

fn export_image_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export plot")
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .set_file_name("spectra.png")
        .save_file();

    if let Some(path) = file {
        let result = save_image(state, &path);
        state.report(result);
    }
}

fn export_long_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export long table")
        .add_filter("CSV", &["csv"])
        .set_file_name("spectra_long.csv")
        .save_file();

    if let Some(path) = file {
        let result = match &state.plot {
            Some(plot) => plot
                .data
                .write_csv(&path)
                .with_context(|| format!("writing {}", path.display())),
            None => Ok(()),
        };
        state.report(result);
    }
}

fn save_image(state: &AppState, path: &Path) -> anyhow::Result<()> {
    let Some(plot) = &state.plot else {
        return Ok(());
    };
    let size = (state.config.plot.export_width, state.config.plot.export_height);
    export::save(plot, path, size).with_context(|| format!("exporting {}", path.display()))
}
