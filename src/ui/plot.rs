use eframe::egui::{Color32, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

use crate::plot::{LegendPosition, SpectralPlot};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Spectral plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn central_plot(ui: &mut Ui, state: &AppState) {
    match &state.plot {
        Some(plot) => spectral_plot(ui, plot),
        None if state.table.is_some() => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Nothing to plot for the current selection");
            });
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a spectral library to view spectra  (File → Open…)");
            });
        }
    }
}

/// Draw a [`SpectralPlot`] with egui_plot.
pub fn spectral_plot(ui: &mut Ui, plot: &SpectralPlot) {
    let corner = match plot.legend.position {
        LegendPosition::Top => Corner::LeftTop,
    };

    Plot::new("spectral_plot")
        .legend(Legend::default().position(corner))
        .x_axis_label(plot.x_label.as_str())
        .y_axis_label(plot.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &plot.series {
                let [r, g, b] = series.color;
                let alpha = (series.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
                let color = Color32::from_rgba_unmultiplied(r, g, b, alpha);

                // one egui line per finite run; runs of a sample share its legend entry
                for run in plot.segments(series) {
                    let points: PlotPoints = run.into_iter().map(|(x, y)| [x, y]).collect();
                    let mut line = Line::new(points).color(color).width(plot.line_width);
                    if let Some(label) = &series.label {
                        line = line.name(label);
                    }
                    plot_ui.line(line);
                }
            }
        });
}
