use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ViewerConfig;
use crate::data::filter::{init_filter_state, matching_rows, FilterState};
use crate::data::model::CellValue;
use crate::data::table::SpectralTable;
use crate::plot::SpectralPlot;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which samples the chart shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every sample, translucent and uncoloured.
    All,
    /// Explicit row indices, each in its own colour.
    Rows(Vec<usize>),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded library (None until user loads a file).
    pub table: Option<SpectralTable>,

    pub selection: Selection,

    /// Per-column metadata filter selections.
    pub filters: FilterState,

    /// Free-text row list typed by the user, e.g. `1, 10, 20`.
    pub index_text: String,

    /// Chart built from `table` and `selection` (cached).
    pub plot: Option<SpectralPlot>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            table: None,
            selection: Selection::All,
            filters: FilterState::default(),
            index_text: String::new(),
            plot: None,
            status_message: None,
        }
    }

    /// Load a CSV file and show it with the given selection.
    pub fn open(&mut self, path: &Path, selection: Selection) -> Result<()> {
        let table = SpectralTable::from_csv(path)
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_table(table, selection)
    }

    /// Ingest a newly loaded table, initialise filters and the chart.
    pub fn set_table(&mut self, table: SpectralTable, selection: Selection) -> Result<()> {
        self.filters = init_filter_state(table.metadata());
        self.index_text = match &selection {
            Selection::All => String::new(),
            Selection::Rows(rows) => format_index_list(rows),
        };
        self.table = Some(table);
        self.selection = selection;
        self.status_message = None;
        self.replot()
    }

    /// Rebuild the chart from the current selection.
    pub fn replot(&mut self) -> Result<()> {
        let Some(table) = &self.table else {
            self.plot = None;
            return Ok(());
        };
        let index = match &self.selection {
            Selection::All => None,
            Selection::Rows(rows) => Some(rows.as_slice()),
        };
        match table.plot_with(index, &self.config.plot) {
            Ok(plot) => {
                self.plot = Some(plot);
                Ok(())
            }
            Err(e) => {
                self.plot = None;
                Err(e.into())
            }
        }
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
        self.selection = selection;
        self.replot()
    }

    /// Parse `index_text` and plot those rows.
    pub fn apply_index_text(&mut self) -> Result<()> {
        let rows = parse_index_list(&self.index_text)?;
        self.set_selection(Selection::Rows(rows))
    }

    /// Plot the rows passing the metadata filters.
    pub fn apply_filters(&mut self) -> Result<()> {
        let Some(table) = &self.table else {
            return Ok(());
        };
        let rows = matching_rows(table.metadata(), &self.filters);
        self.index_text = format_index_list(&rows);
        self.set_selection(Selection::Rows(rows))
    }

    /// Toggle a single metadata value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: &str) {
        if let Some(table) = &self.table {
            self.filters
                .insert(column.to_string(), table.metadata().unique_values(column));
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
    }

    /// Record a failure for the status bar.
    pub fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            log::error!("{e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        } else {
            self.status_message = None;
        }
    }
}

/// Parse a comma or whitespace separated list of row indices.
pub fn parse_index_list(text: &str) -> Result<Vec<usize>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<usize>()
                .with_context(|| format!("'{tok}' is not a row index"))
        })
        .collect()
}

pub fn format_index_list(rows: &[usize]) -> String {
    rows.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
