//! Plot layer: the chart object handed to rendering backends.
//!
//! ```text
//!   SpectralTable::plot(index)
//!        │  wide → long reshape
//!        ▼
//!   ┌──────────────┐
//!   │ SpectralPlot  │  LongTable + one Series per drawn line + labels/legend
//!   └──────────────┘
//!        │
//!        ├──► ui::plot   (egui_plot, interactive)
//!        └──► export     (plotters, PNG / SVG)
//! ```

pub mod export;

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;

use serde::Serialize;

use crate::color::{Rgb, SampleColors};
use crate::config::PlotConfig;
use crate::error::Result;

pub const X_LABEL: &str = "Wavelength(nm)";
pub const Y_LABEL: &str = "Reflectance";

// ---------------------------------------------------------------------------
// Long-form table
// ---------------------------------------------------------------------------

/// One (sample, wavelength) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LongRecord {
    /// Row index of the sample in the source table.
    pub sample: usize,
    pub wavelength: f64,
    pub reflectance: f64,
}

/// Reflectance in long form. Records are grouped by sample, wavelengths in
/// source column order within each group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    records: Vec<LongRecord>,
}

impl LongTable {
    pub(crate) fn from_records(records: Vec<LongRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LongRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct sample indices present.
    pub fn samples(&self) -> BTreeSet<usize> {
        self.records.iter().map(|r| r.sample).collect()
    }

    /// Write as CSV with a `sample,wavelength,reflectance` header.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SpectralPlot – renderable chart object
// ---------------------------------------------------------------------------

/// One line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub sample: usize,
    /// Legend label. `None` when lines are not colour-grouped.
    pub label: Option<String>,
    pub color: Rgb,
    pub opacity: f32,
    /// Slice of [`LongTable::records`] holding this line's points.
    pub records: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Top,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub position: LegendPosition,
    pub title: Option<String>,
}

/// A line chart of reflectance against wavelength, one line per sample.
/// Built by [`crate::SpectralTable::plot`]; nothing is drawn until a
/// renderer consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralPlot {
    pub data: LongTable,
    pub series: Vec<Series>,
    pub x_label: String,
    pub y_label: String,
    pub background: Rgb,
    pub legend: Legend,
    pub line_width: f32,
}

impl SpectralPlot {
    /// Build the chart from long-form data laid out as consecutive blocks of
    /// `block_len` records, one block per drawn line.
    ///
    /// `highlight` switches between the two styles: `false` draws every line
    /// in the neutral colour at reduced opacity, `true` gives every sample
    /// its own opaque colour and legend entry.
    pub(crate) fn build(
        data: LongTable,
        block_len: usize,
        highlight: bool,
        config: &PlotConfig,
    ) -> Self {
        let n_lines = if block_len == 0 {
            0
        } else {
            data.len() / block_len
        };
        let lines: Vec<(usize, Range<usize>)> = (0..n_lines)
            .map(|i| {
                let range = i * block_len..(i + 1) * block_len;
                (data.records()[range.start].sample, range)
            })
            .collect();

        let colors = highlight.then(|| SampleColors::new(&data.samples()));

        let series = lines
            .into_iter()
            .map(|(sample, records)| match &colors {
                Some(colors) => Series {
                    sample,
                    label: Some(sample.to_string()),
                    color: colors.color_for(sample),
                    opacity: 1.0,
                    records,
                },
                None => Series {
                    sample,
                    label: None,
                    color: config.neutral_color,
                    opacity: config.all_rows_opacity,
                    records,
                },
            })
            .collect();

        SpectralPlot {
            data,
            series,
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            background: [255, 255, 255],
            legend: Legend {
                position: LegendPosition::Top,
                title: None,
            },
            line_width: config.line_width,
        }
    }

    /// Points of one series as `(wavelength, reflectance)`.
    pub fn points<'a>(&'a self, series: &'a Series) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.data.records()[series.records.clone()]
            .iter()
            .map(|r| (r.wavelength, r.reflectance))
    }

    /// Points of one series split into runs of finite values. A NaN cell ends
    /// the current run, so renderers leave a gap instead of bridging it.
    pub fn segments(&self, series: &Series) -> Vec<Vec<(f64, f64)>> {
        let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut current = Vec::new();
        for (x, y) in self.points(series) {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Distinct colour groups (labelled samples).
    pub fn color_groups(&self) -> BTreeSet<usize> {
        self.series
            .iter()
            .filter(|s| s.label.is_some())
            .map(|s| s.sample)
            .collect()
    }

    /// Legend entries in ascending sample order, one per colour group.
    pub fn legend_entries(&self) -> Vec<(String, Rgb)> {
        let mut seen = BTreeSet::new();
        let mut entries: Vec<(usize, String, Rgb)> = self
            .series
            .iter()
            .filter_map(|s| {
                let label = s.label.as_ref()?;
                seen.insert(s.sample).then(|| (s.sample, label.clone(), s.color))
            })
            .collect();
        entries.sort_by_key(|(sample, _, _)| *sample);
        entries.into_iter().map(|(_, l, c)| (l, c)).collect()
    }

    /// Finite x/y extent of the data, or `None` if there is nothing to draw.
    pub fn bounds(&self) -> Option<(Range<f64>, Range<f64>)> {
        let finite = self
            .data
            .records()
            .iter()
            .filter(|r| r.wavelength.is_finite() && r.reflectance.is_finite());

        let mut out: Option<(f64, f64, f64, f64)> = None;
        for r in finite {
            let (x0, x1, y0, y1) =
                out.unwrap_or((r.wavelength, r.wavelength, r.reflectance, r.reflectance));
            out = Some((
                x0.min(r.wavelength),
                x1.max(r.wavelength),
                y0.min(r.reflectance),
                y1.max(r.reflectance),
            ));
        }
        out.map(|(x0, x1, y0, y1)| (x0..x1, y0..y1))
    }
}
