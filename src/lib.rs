//! Loader and line-plot viewer for wide-format spectral reflectance libraries.
//!
//! A library is a CSV with one row per sample. Columns whose names start with
//! a number (`350`, `350.5`, `450nm`) hold reflectance at that wavelength;
//! every other column is sample metadata.
//!
//! # Example
//!
//! ```no_run
//! use rusty_speclib::SpectralTable;
//!
//! let lib = SpectralTable::from_csv("spc.csv").unwrap();
//! let plot = lib.plot(Some(&[1, 10, 20])).unwrap();
//! rusty_speclib::plot::export::save(&plot, "spc.png".as_ref(), (1200, 800)).unwrap();
//! ```

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod plot;
pub mod state;
pub mod ui;

pub use config::{PlotConfig, ViewerConfig};
pub use data::model::{CellValue, MetadataTable, ReflectanceMatrix};
pub use data::table::SpectralTable;
pub use error::{Result, SpeclibError};
pub use plot::{LongRecord, LongTable, SpectralPlot};
