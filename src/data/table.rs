use std::path::{Path, PathBuf};

use super::classify::{partition, wavelength_of};
use super::loader::{load_csv, parse_reflectance, RawTable};
use super::model::{CellValue, MetadataTable, ReflectanceMatrix};
use crate::config::PlotConfig;
use crate::error::{Result, SpeclibError};
use crate::plot::{LongRecord, LongTable, SpectralPlot};

// ---------------------------------------------------------------------------
// SpectralTable – the loaded library
// ---------------------------------------------------------------------------

/// A wide-format spectral library split into its spectral and metadata halves.
///
/// Immutable once built: every accessor hands out a shared borrow, so the
/// row/column invariants hold for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct SpectralTable {
    path: PathBuf,
    wavelength: Vec<f64>,
    wavelength_names: Vec<String>,
    reflectance: ReflectanceMatrix,
    metadata: MetadataTable,
}

impl SpectralTable {
    /// Load and classify a CSV file with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = load_csv(path)?;
        let table = Self::from_raw(path, raw)?;

        log::info!(
            "Loaded {} samples from {} ({} spectral, {} metadata columns)",
            table.n_samples(),
            path.display(),
            table.wavelength.len(),
            table.metadata.n_cols()
        );
        Ok(table)
    }

    /// Classify the columns of an already-read table.
    ///
    /// Fails with [`SpeclibError::Parse`] if the header is empty or a row
    /// does not have one cell per header.
    pub fn from_raw(path: &Path, raw: RawTable) -> Result<Self> {
        if raw.headers.is_empty() {
            return Err(SpeclibError::parse(path, "no header row"));
        }
        let n_cols = raw.headers.len();
        if let Some((row_no, row)) = raw.rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(SpeclibError::parse(
                path,
                format!("row {row_no}: expected {n_cols} fields, found {}", row.len()),
            ));
        }

        let parts = partition(raw.headers.as_slice());
        let n_rows = raw.n_rows();

        let wavelength_names: Vec<String> = parts
            .spectral
            .iter()
            .map(|&c| raw.headers[c].clone())
            .collect();
        // every spectral name matched the prefix pattern, so this never yields NaN
        let wavelength: Vec<f64> = wavelength_names
            .iter()
            .map(|name| wavelength_of(name).unwrap_or(f64::NAN))
            .collect();

        let mut values = Vec::with_capacity(n_rows * parts.spectral.len());
        let mut n_nan = 0usize;
        for row in &raw.rows {
            for &c in &parts.spectral {
                let v = parse_reflectance(&row[c]);
                if v.is_nan() {
                    n_nan += 1;
                }
                values.push(v);
            }
        }
        if n_nan > 0 {
            log::debug!("{n_nan} reflectance cells were not numeric and read as NaN");
        }
        let reflectance = ReflectanceMatrix::from_row_major(n_rows, parts.spectral.len(), values);

        let meta_columns: Vec<String> = parts
            .metadata
            .iter()
            .map(|&c| raw.headers[c].clone())
            .collect();
        let meta_rows: Vec<Vec<CellValue>> = raw
            .rows
            .iter()
            .map(|row| parts.metadata.iter().map(|&c| CellValue::guess(&row[c])).collect())
            .collect();
        let metadata = MetadataTable::new(meta_columns, meta_rows);

        Ok(SpectralTable {
            path: path.to_path_buf(),
            wavelength,
            wavelength_names,
            reflectance,
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wavelengths parsed from the spectral column names, in column order.
    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    /// The spectral column names as they appear in the file.
    pub fn wavelength_names(&self) -> &[String] {
        &self.wavelength_names
    }

    pub fn reflectance(&self) -> &ReflectanceMatrix {
        &self.reflectance
    }

    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    /// Number of samples (rows).
    pub fn n_samples(&self) -> usize {
        self.reflectance.n_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    fn check_indices(&self, index: &[usize]) -> Result<()> {
        let n_samples = self.n_samples();
        match index.iter().find(|&&i| i >= n_samples) {
            Some(&index) => Err(SpeclibError::Index { index, n_samples }),
            None => Ok(()),
        }
    }

    /// Reshape selected rows to long form: one record per sample and
    /// wavelength. `None` selects every row in source order.
    pub fn to_long(&self, index: Option<&[usize]>) -> Result<LongTable> {
        let all: Vec<usize>;
        let rows = match index {
            Some(rows) => {
                self.check_indices(rows)?;
                rows
            }
            None => {
                all = (0..self.n_samples()).collect();
                all.as_slice()
            }
        };

        let mut records = Vec::with_capacity(rows.len() * self.wavelength.len());
        for &sample in rows {
            let Some(values) = self.reflectance.row(sample) else {
                continue;
            };
            records.extend(
                self.wavelength
                    .iter()
                    .zip(values)
                    .map(|(&wavelength, &reflectance)| LongRecord {
                        sample,
                        wavelength,
                        reflectance,
                    }),
            );
        }
        Ok(LongTable::from_records(records))
    }

    /// Build a line chart of reflectance against wavelength with default
    /// styling. See [`SpectralTable::plot_with`].
    pub fn plot(&self, index: Option<&[usize]>) -> Result<SpectralPlot> {
        self.plot_with(index, &PlotConfig::default())
    }

    /// Build a line chart, one line per sample.
    ///
    /// * `None` – every sample, neutral colour, reduced opacity.
    /// * `Some(rows)` – only those samples, opaque, coloured by row index.
    ///
    /// Fails with [`SpeclibError::Index`] if a row is out of range.
    pub fn plot_with(&self, index: Option<&[usize]>, config: &PlotConfig) -> Result<SpectralPlot> {
        let data = self.to_long(index)?;
        Ok(SpectralPlot::build(
            data,
            self.wavelength.len(),
            index.is_some(),
            config,
        ))
    }
}
