use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Column-name classification
// ---------------------------------------------------------------------------

/// Digits, optionally followed by a decimal point and more digits. Anchored at
/// the start only: "450nm" is spectral, "abc450" is not.
static WAVELENGTH_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?").expect("valid wavelength regex"));

/// Which side of the partition a column landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Spectral,
    Metadata,
}

/// Classify a single column name.
pub fn classify(name: &str) -> ColumnKind {
    if WAVELENGTH_PREFIX.is_match(name) {
        ColumnKind::Spectral
    } else {
        ColumnKind::Metadata
    }
}

/// Parse the wavelength encoded in a spectral column name.
///
/// Only the matched numeric prefix is parsed, so `"450nm"` gives `450.0`.
/// Returns `None` for metadata names.
pub fn wavelength_of(name: &str) -> Option<f64> {
    WAVELENGTH_PREFIX
        .find(name)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Source column positions split into spectral and metadata sets, each in
/// original header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPartition {
    pub spectral: Vec<usize>,
    pub metadata: Vec<usize>,
}

/// Partition header names. Every position lands in exactly one set.
pub fn partition<S: AsRef<str>>(headers: &[S]) -> ColumnPartition {
    let mut out = ColumnPartition::default();
    for (idx, name) in headers.iter().enumerate() {
        let kind = classify(name.as_ref());
        log::debug!("column {idx} {:?} -> {kind:?}", name.as_ref());
        match kind {
            ColumnKind::Spectral => out.spectral.push(idx),
            ColumnKind::Metadata => out.metadata.push(idx),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numerals_are_spectral() {
        assert_eq!(classify("450"), ColumnKind::Spectral);
        assert_eq!(classify("350.5"), ColumnKind::Spectral);
        assert_eq!(classify("0"), ColumnKind::Spectral);
    }

    #[test]
    fn prefix_match_is_preserved() {
        assert_eq!(classify("450nm"), ColumnKind::Spectral);
        assert_eq!(classify("123abc"), ColumnKind::Spectral);
        assert_eq!(classify("abc123"), ColumnKind::Metadata);
        assert_eq!(classify(" 450"), ColumnKind::Metadata);
        assert_eq!(classify(".5"), ColumnKind::Metadata);
        assert_eq!(classify(""), ColumnKind::Metadata);
    }

    #[test]
    fn wavelength_parses_numeric_prefix() {
        assert_eq!(wavelength_of("450"), Some(450.0));
        assert_eq!(wavelength_of("450.5"), Some(450.5));
        assert_eq!(wavelength_of("450nm"), Some(450.0));
        assert_eq!(wavelength_of("450.nm"), Some(450.0));
        assert_eq!(wavelength_of("1.2.3"), Some(1.2));
        assert_eq!(wavelength_of("sample_id"), None);
    }

    #[test]
    fn partition_covers_every_column_once() {
        let headers = ["id", "450", "site", "500.5", "550nm", "x1"];
        let p = partition(&headers[..]);
        assert_eq!(p.spectral, vec![1, 3, 4]);
        assert_eq!(p.metadata, vec![0, 2, 5]);

        let mut all: Vec<usize> = p.spectral.iter().chain(&p.metadata).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..headers.len()).collect::<Vec<_>>());
    }
}
