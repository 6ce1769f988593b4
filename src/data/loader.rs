use std::collections::{HashMap, HashSet};
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, SpeclibError};

// ---------------------------------------------------------------------------
// RawTable – the CSV as read, before classification
// ---------------------------------------------------------------------------

/// Header names plus row-aligned string cells, exactly as they appear in the
/// source file.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Text of one column, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r[idx].as_str())
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: a header row of column names followed by one row per sample.
///
/// ```text
/// sample_id,site,350,351,352,...
/// S001,A,0.041,0.043,0.044,...
/// ```
///
/// Every row must have as many fields as the header. Repeated header names
/// get a `.N` suffix (see [`dedup_headers`]). Cells are kept as text; typing
/// happens once columns are classified.
pub fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| SpeclibError::parse(path, e))?;

    let headers = dedup_headers(
        reader
            .headers()
            .map_err(|e| SpeclibError::parse(path, e))?
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );

    if headers.is_empty() {
        return Err(SpeclibError::parse(path, "no header row"));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| SpeclibError::parse(path, format!("row {row_no}: {e}")))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    log::debug!(
        "read {} rows x {} columns from {}",
        rows.len(),
        headers.len(),
        path.display()
    );

    Ok(RawTable { headers, rows })
}

/// Make header names unique. The second `site` becomes `site.1`, the third
/// `site.2`; a generated name that is already taken gets another suffix.
/// A repeated `450` becomes `450.1`, which then reads as wavelength 450.1.
pub fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());

    for name in headers {
        if taken.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let n = next_suffix.entry(name.clone()).or_insert(1);
        let renamed = loop {
            let candidate = format!("{name}.{n}");
            *n += 1;
            if taken.insert(candidate.clone()) {
                break candidate;
            }
        };
        log::debug!("renamed duplicate column {name:?} to {renamed:?}");
        out.push(renamed);
    }
    out
}

/// Parse a reflectance cell. Anything that is not a number becomes `NaN`.
pub fn parse_reflectance(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_headers_and_rows() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "id,450,500")?;
        writeln!(file, "a,0.1,0.2")?;
        writeln!(file, "b,0.3,0.4")?;

        let table = load_csv(file.path())?;
        assert_eq!(table.headers, vec!["id", "450", "500"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column(1).collect::<Vec<_>>(), vec!["0.1", "0.3"]);
        Ok(())
    }

    #[test]
    fn missing_file_is_parse_error() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SpeclibError::Parse { .. }));
    }

    #[test]
    fn empty_file_is_parse_error() -> anyhow::Result<()> {
        let file = NamedTempFile::new()?;
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, SpeclibError::Parse { .. }));
        Ok(())
    }

    #[test]
    fn ragged_rows_are_parse_error() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "id,450,500")?;
        writeln!(file, "a,0.1")?;

        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, SpeclibError::Parse { .. }));
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_parse_error() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"id,450\n\xff\xfe,0.1\n")?;

        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, SpeclibError::Parse { .. }));
        Ok(())
    }

    #[test]
    fn duplicate_headers_get_suffixes() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "site,site,450,450,site")?;
        writeln!(file, "A,X,0.1,0.2,P")?;

        let table = load_csv(file.path())?;
        assert_eq!(table.headers, vec!["site", "site.1", "450", "450.1", "site.2"]);
        Ok(())
    }

    #[test]
    fn generated_names_never_collide() {
        let headers = ["a", "a.1", "a", "a"].map(String::from).to_vec();
        assert_eq!(dedup_headers(headers), vec!["a", "a.1", "a.2", "a.3"]);
    }

    #[test]
    fn non_numeric_reflectance_becomes_nan() {
        assert_eq!(parse_reflectance(" 0.5 "), 0.5);
        assert!(parse_reflectance("n/a").is_nan());
        assert!(parse_reflectance("").is_nan());
    }
}
