//! Static image export of a [`SpectralPlot`] using the plotters library.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::SpectralPlot;
use crate::error::{Result, SpeclibError};

/// Save the plot, picking the backend from the file extension.
///
/// Supported formats:
/// * `.png` – bitmap
/// * `.svg` – vector
pub fn save(plot: &SpectralPlot, path: &Path, size: (u32, u32)) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "png" => save_png(plot, path, size),
        "svg" => save_svg(plot, path, size),
        other => Err(SpeclibError::Render(format!(
            "unsupported image extension: .{other}"
        ))),
    }
}

pub fn save_png(plot: &SpectralPlot, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw(&root, plot)?;
    log::info!("saved plot to {}", path.display());
    Ok(())
}

pub fn save_svg(plot: &SpectralPlot, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw(&root, plot)?;
    log::info!("saved plot to {}", path.display());
    Ok(())
}

fn render_err(e: impl std::fmt::Display) -> SpeclibError {
    SpeclibError::Render(e.to_string())
}

/// Widen a degenerate range so the axis still has a span.
fn padded(r: Range<f64>) -> Range<f64> {
    let span = r.end - r.start;
    if span.abs() < f64::EPSILON {
        (r.start - 0.5)..(r.end + 0.5)
    } else {
        let pad = span * 0.02;
        (r.start - pad)..(r.end + pad)
    }
}

fn draw<DB>(root: &DrawingArea<DB, Shift>, plot: &SpectralPlot) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let [br, bg, bb] = plot.background;
    root.fill(&RGBColor(br, bg, bb)).map_err(render_err)?;

    let (x_range, y_range) = plot.bounds().unwrap_or((0.0..1.0, 0.0..1.0));

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(padded(x_range), padded(y_range))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(plot.x_label.as_str())
        .y_desc(plot.y_label.as_str())
        .light_line_style(RGBColor(235, 235, 235))
        .draw()
        .map_err(render_err)?;

    let mut labelled = BTreeSet::new();
    for series in &plot.series {
        let [r, g, b] = series.color;
        let style = RGBColor(r, g, b)
            .mix(series.opacity as f64)
            .stroke_width(plot.line_width.round().max(1.0) as u32);

        for run in plot.segments(series) {
            let anno = chart
                .draw_series(LineSeries::new(run, style))
                .map_err(render_err)?;

            if let Some(label) = &series.label {
                if labelled.insert(series.sample) {
                    anno.label(label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                }
            }
        }
    }

    if !labelled.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperMiddle)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::plot::{LongRecord, LongTable};

    /// Samples 0..5 at 400–600 nm, reflectance 0.1–0.4.
    fn library(samples: &[usize]) -> LongTable {
        let records = samples
            .iter()
            .flat_map(|&s| {
                [400.0, 500.0, 600.0].into_iter().map(move |w| LongRecord {
                    sample: s,
                    wavelength: w,
                    reflectance: 0.1 + s as f64 * 0.05 + (w - 400.0) / 2000.0,
                })
            })
            .collect();
        LongTable::from_records(records)
    }

    fn render_svg(plot: &SpectralPlot) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectra.svg");
        save(plot, &path, (640, 480)).unwrap();
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn unsupported_extension_is_render_error() {
        let plot = SpectralPlot::build(LongTable::default(), 0, false, &PlotConfig::default());
        let err = save(&plot, Path::new("out.bmpx"), (100, 100)).unwrap_err();
        assert!(matches!(err, SpeclibError::Render(_)));
    }

    #[test]
    fn padding_widens_degenerate_ranges() {
        assert_eq!(padded(1.0..1.0), 0.5..1.5);
        let r = padded(0.0..100.0);
        assert!(r.start < 0.0 && r.end > 100.0);
    }

    #[test]
    fn svg_of_selected_rows_has_labels_and_legend() {
        let plot = SpectralPlot::build(library(&[3, 4]), 3, true, &PlotConfig::default());
        let svg = render_svg(&plot);

        assert!(svg.contains("Wavelength(nm)"));
        assert!(svg.contains("Reflectance"));
        assert!(svg.to_ascii_lowercase().contains("fill=\"#ffffff\""));
        assert!(svg.contains(">3</text>"));
        assert!(svg.contains(">4</text>"));
    }

    #[test]
    fn svg_of_all_rows_has_no_legend() {
        let plot = SpectralPlot::build(library(&[0, 1, 2, 3, 4]), 3, false, &PlotConfig::default());
        let svg = render_svg(&plot);

        assert!(svg.contains("Wavelength(nm)"));
        assert!(svg.contains("Reflectance"));
        assert!(!svg.contains(">3</text>"));
        assert!(!svg.contains(">4</text>"));
    }
}
