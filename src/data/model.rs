use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a metadata column
// ---------------------------------------------------------------------------

/// A dynamically-typed metadata cell, guessed from its CSV text.
/// Used as a `BTreeSet` key downstream, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV cell.
    pub fn guess(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" | "TRUE" => CellValue::Bool(true),
            "false" | "False" | "FALSE" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// ReflectanceMatrix – samples × spectral columns
// ---------------------------------------------------------------------------

/// Dense row-major reflectance values: one row per sample, one column per
/// spectral column of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectanceMatrix {
    n_rows: usize,
    n_cols: usize,
    values: Vec<f64>,
}

impl ReflectanceMatrix {
    /// Build from row-major values. `values.len()` must equal `n_rows * n_cols`.
    pub(crate) fn from_row_major(n_rows: usize, n_cols: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), n_rows * n_cols);
        Self {
            n_rows,
            n_cols,
            values,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Reflectance of one sample across all wavelengths.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.n_rows {
            return None;
        }
        let start = row * self.n_cols;
        Some(&self.values[start..start + self.n_cols])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.n_cols {
            return None;
        }
        self.row(row).map(|r| r[col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows).map(move |r| &self.values[r * self.n_cols..(r + 1) * self.n_cols])
    }
}

// ---------------------------------------------------------------------------
// MetadataTable – samples × metadata columns
// ---------------------------------------------------------------------------

/// The non-spectral columns of the source table, row-aligned with the
/// reflectance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl MetadataTable {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column names in original order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Value of `column` in `row`.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Sorted set of distinct values of a column.
    pub fn unique_values(&self, column: &str) -> BTreeSet<CellValue> {
        let Some(col) = self.column_index(column) else {
            return BTreeSet::new();
        };
        self.rows.iter().map(|r| r[col].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_cell_types() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess(" 42 "), CellValue::Integer(42));
        assert_eq!(CellValue::guess("0.25"), CellValue::Float(0.25));
        assert_eq!(CellValue::guess("True"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("site A"), CellValue::String("site A".into()));
    }

    #[test]
    fn ordering_groups_by_type() {
        let mut set = BTreeSet::new();
        set.insert(CellValue::String("b".into()));
        set.insert(CellValue::Integer(3));
        set.insert(CellValue::Null);
        set.insert(CellValue::String("a".into()));
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                CellValue::Null,
                CellValue::Integer(3),
                CellValue::String("a".into()),
                CellValue::String("b".into()),
            ]
        );
    }

    #[test]
    fn matrix_rows_are_contiguous() {
        let m = ReflectanceMatrix::from_row_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(m.get(0, 2), Some(3.0));
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.row(2), None);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    fn zero_column_matrix_keeps_row_count() {
        let m = ReflectanceMatrix::from_row_major(4, 0, Vec::new());
        assert_eq!(m.n_rows(), 4);
        assert_eq!(m.n_cols(), 0);
        assert_eq!(m.row(3), Some(&[][..]));
        assert_eq!(m.rows().count(), 4);
    }

    #[test]
    fn metadata_unique_values() {
        let meta = MetadataTable::new(
            vec!["site".into()],
            vec![
                vec![CellValue::String("B".into())],
                vec![CellValue::String("A".into())],
                vec![CellValue::String("B".into())],
            ],
        );
        let uniq: Vec<_> = meta.unique_values("site").into_iter().collect();
        assert_eq!(
            uniq,
            vec![CellValue::String("A".into()), CellValue::String("B".into())]
        );
        assert!(meta.unique_values("missing").is_empty());
        assert_eq!(meta.get(1, "site"), Some(&CellValue::String("A".into())));
    }
}
