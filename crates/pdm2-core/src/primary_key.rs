//! Primary-key resolution
//!
//! A table points at its primary key through a reference to one of its own
//! keys; the key in turn lists column references. A column is part of the
//! primary key when that chain resolves to its identifier.

use std::collections::HashSet;
use crate::model::{Column, Table};

/// Set of column identifiers making up a table's primary key
///
/// Built once per table so the report can test each column in constant time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrimaryKeyColumns<'a> {
    ids: HashSet<&'a str>,
}

impl<'a> PrimaryKeyColumns<'a> {
    /// Resolve the primary-key columns of a table
    ///
    /// Empty when the table has no primary-key reference, when the reference
    /// matches none of the table's keys, or when the key lists no columns.
    pub fn for_table(table: &'a Table) -> Self {
        let ids = table
            .primary_key()
            .map(|key| key.columns.iter().map(|c| c.column_ref.as_str()).collect())
            .unwrap_or_default();

        Self { ids }
    }

    /// Whether the column belongs to the primary key
    pub fn contains(&self, column: &Column) -> bool {
        self.ids.contains(column.id.as_str())
    }

    /// Number of distinct column references in the key
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Whether `column` participates in `table`'s primary key
pub fn is_primary_key_column(table: &Table, column: &Column) -> bool {
    table
        .primary_key()
        .is_some_and(|key| key.references(&column.id))
}
