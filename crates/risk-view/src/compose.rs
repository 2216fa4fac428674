//! View composition.
//!
//! [`compose`] is the only place the four inputs meet. It holds no state and
//! returns borrowed rows, so the displayed values are exactly the source
//! values and any formatting is left to the renderer.

use risk_model::{Dataset, Row};

use crate::{ColumnVisibilityStore, SortState, ValueFilterStore};

/// Columns and rows to render, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedView<'a> {
    pub columns: Vec<String>,
    pub rows: Vec<&'a Row>,
}

impl ComposedView<'_> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Derive the displayed table.
///
/// 1. visible columns for the dataset's report, restricted to columns that
///    exist in the dataset;
/// 2. rows not vetoed by any hidden value, in source order;
/// 3. a stable sort when one is set.
///
/// Never panics: an empty dataset, unknown column names and a sort on a
/// hidden or unknown column are all accepted.
pub fn compose<'a>(
    dataset: &'a Dataset,
    visibility: &ColumnVisibilityStore,
    filters: &ValueFilterStore,
    sort: &SortState,
) -> ComposedView<'a> {
    let universe = dataset.column_universe();
    let columns = visibility
        .visible_columns(dataset.report_key(), &universe)
        .into_iter()
        .filter(|column| universe.contains(column))
        .collect();

    let veto = filters.veto(dataset.report_key());
    let mut rows: Vec<&Row> = dataset.rows().iter().filter(|row| !veto.vetoes(row)).collect();
    sort.apply(&mut rows);

    ComposedView { columns, rows }
}
