//! Command-line entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use crate::app::SpeclibApp;
use crate::config::ViewerConfig;
use crate::data::table::SpectralTable;
use crate::plot::{export, SpectralPlot};
use crate::state::{AppState, Selection};

#[derive(Parser, Debug)]
#[command(name = "rusty-speclib")]
#[command(about = "Spectral reflectance library viewer", version)]
pub struct Cli {
    /// Wide-format spectral library (CSV with a header row)
    pub input: Option<PathBuf>,

    /// Zero-based row indices to highlight, e.g. `--index 1,10,20` (default:
    /// all rows). Negative positions are not accepted
    #[arg(short, long, value_delimiter = ',')]
    pub index: Option<Vec<usize>>,

    /// Path to YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the plot to this file (.png, .svg, or .csv for the long table)
    /// instead of opening the viewer
    #[arg(short, long, requires = "input")]
    pub save: Option<PathBuf>,
}

/// Dispatch on the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ViewerConfig::from_yaml(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    match (&cli.input, &cli.save) {
        (Some(input), Some(output)) => {
            run_export(input, cli.index.as_deref(), output, &config)?;
            Ok(())
        }
        _ => run_viewer(cli.input.as_deref(), cli.index, config),
    }
}

/// Load `input`, plot the selected rows and write the result to `output`
/// without opening a window.
pub fn run_export(
    input: &Path,
    index: Option<&[usize]>,
    output: &Path,
    config: &ViewerConfig,
) -> Result<SpectralPlot> {
    let table = SpectralTable::from_csv(input)
        .with_context(|| format!("loading {}", input.display()))?;
    let plot = table.plot_with(index, &config.plot)?;

    let is_csv = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        plot.data
            .write_csv(output)
            .with_context(|| format!("writing {}", output.display()))?;
    } else {
        let size = (config.plot.export_width, config.plot.export_height);
        export::save(&plot, output, size)
            .with_context(|| format!("exporting {}", output.display()))?;
    }
    Ok(plot)
}

/// Open the interactive viewer, preloading `input` if given.
pub fn run_viewer(input: Option<&Path>, index: Option<Vec<usize>>, config: ViewerConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window.inner_size)
            .with_min_inner_size(config.window.min_inner_size),
        ..Default::default()
    };

    let mut state = AppState::new(config);
    if let Some(path) = input {
        let selection = index.map_or(Selection::All, Selection::Rows);
        let result = state.open(path, selection);
        state.report(result);
    }

    eframe::run_native(
        "Rusty Speclib – Spectral Library Viewer",
        options,
        Box::new(|cc| Ok(Box::new(SpeclibApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn library() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,450,500,550").unwrap();
        for i in 0..5 {
            writeln!(file, "s{i},0.{i}1,0.{i}2,0.{i}3").unwrap();
        }
        file
    }

    #[test]
    fn test_cli_parses_index_list() {
        let cli = Cli::try_parse_from(["rusty-speclib", "spc.csv", "--index", "1,10,20"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("spc.csv")));
        assert_eq!(cli.index, Some(vec![1, 10, 20]));
        assert!(cli.save.is_none());
    }

    #[test]
    fn test_cli_rejects_negative_index() {
        assert!(Cli::try_parse_from(["rusty-speclib", "spc.csv", "--index=-1"]).is_err());
        assert!(Cli::try_parse_from(["rusty-speclib", "spc.csv", "--index", "2,-1"]).is_err());

        let help = <Cli as clap::CommandFactory>::command()
            .render_long_help()
            .to_string();
        assert!(help.contains("Negative positions are not accepted"));
    }

    #[test]
    fn test_cli_save_requires_input() {
        assert!(Cli::try_parse_from(["rusty-speclib", "--save", "out.png"]).is_err());
    }

    #[test]
    fn test_export_long_csv() {
        let input = library();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("long.csv");

        let plot = run_export(input.path(), Some(&[0, 2]), &output, &ViewerConfig::default()).unwrap();
        assert_eq!(plot.data.len(), 6);

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "sample,wavelength,reflectance");
        assert_eq!(lines[4], "2,450.0,0.21");
    }

    #[test]
    fn test_export_rejects_out_of_range_index() {
        let input = library();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("long.csv");

        let err = run_export(input.path(), Some(&[99]), &output, &ViewerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("99"));
        assert!(!output.exists());
    }
}
