use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, MetadataTable};

// ---------------------------------------------------------------------------
// Sample selection by metadata values
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of selected values.
/// A column absent from the map is unconstrained.
pub type FilterState = BTreeMap<String, BTreeSet<CellValue>>;

/// Initialise a [`FilterState`] with all values selected (i.e., match every row).
pub fn init_filter_state(meta: &MetadataTable) -> FilterState {
    meta.columns()
        .iter()
        .map(|col| (col.clone(), meta.unique_values(col)))
        .collect()
}

/// Return row indices whose metadata passes all filters, in source order.
///
/// A row passes a column filter when:
/// * The column is not present in `filters` → passes (no constraint)
/// * The filter set for that column is empty → nothing selected → fails
/// * The row's value for that column is in the selected set → passes
/// * The table has no such column → passes only if `Null` is selected
pub fn matching_rows(meta: &MetadataTable, filters: &FilterState) -> Vec<usize> {
    let resolved: Vec<(Option<usize>, &BTreeSet<CellValue>)> = filters
        .iter()
        .map(|(col, selected)| (meta.column_index(col), selected))
        .collect();

    (0..meta.n_rows())
        .filter(|&row| {
            let Some(values) = meta.row(row) else {
                return false;
            };
            resolved.iter().all(|(col, selected)| match col {
                Some(c) => selected.contains(&values[*c]),
                None => selected.contains(&CellValue::Null),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> MetadataTable {
        let s = |v: &str| CellValue::String(v.into());
        MetadataTable::new(
            vec!["site".into(), "year".into()],
            vec![
                vec![s("A"), CellValue::Integer(2020)],
                vec![s("B"), CellValue::Integer(2021)],
                vec![s("A"), CellValue::Integer(2021)],
                vec![s("C"), CellValue::Null],
            ],
        )
    }

    #[test]
    fn full_selection_matches_everything() {
        let m = meta();
        let state = init_filter_state(&m);
        assert_eq!(state.len(), 2);
        assert_eq!(matching_rows(&m, &state), vec![0, 1, 2, 3]);
        assert_eq!(matching_rows(&m, &FilterState::new()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn filters_intersect_across_columns() {
        let m = meta();
        let mut state = FilterState::new();
        state.insert("site".into(), [CellValue::String("A".into())].into_iter().collect());
        assert_eq!(matching_rows(&m, &state), vec![0, 2]);

        state.insert("year".into(), [CellValue::Integer(2021)].into_iter().collect());
        assert_eq!(matching_rows(&m, &state), vec![2]);
    }

    #[test]
    fn empty_selection_hides_all() {
        let m = meta();
        let mut state = init_filter_state(&m);
        state.insert("site".into(), BTreeSet::new());
        assert!(matching_rows(&m, &state).is_empty());
    }

    #[test]
    fn unknown_column_needs_null() {
        let m = meta();
        let mut state = FilterState::new();
        state.insert("depth".into(), [CellValue::Integer(1)].into_iter().collect());
        assert!(matching_rows(&m, &state).is_empty());

        state.insert("depth".into(), [CellValue::Null].into_iter().collect());
        assert_eq!(matching_rows(&m, &state).len(), 4);
    }
}
