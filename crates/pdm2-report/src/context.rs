//! Template context for the report
//!
//! A borrowed, serializable view of the model shaped after the template:
//! model metadata at the top level, and one row per column with the
//! primary-key flag already resolved.

use minijinja::Value as MinijinjaValue;
use pdm2_core::{Column, Model, PrimaryKeyColumns, Table};
use serde::Serialize;

/// Top-level template context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContext<'a> {
    pub name: &'a str,
    pub author: &'a str,
    pub version: &'a str,
    pub file_name: &'a str,
    pub comment: &'a str,

    /// DBMS display name
    pub dbms: &'a str,

    /// Tables in document order
    pub tables: Vec<TableView<'a>>,
}

/// One table as shown in the table list and its detail section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView<'a> {
    pub name: &'a str,

    /// Anchor of the detail section; the list entry uses `list_{code}`
    pub code: &'a str,

    pub comment: &'a str,

    /// Columns in document order
    pub columns: Vec<ColumnRow<'a>>,
}

/// One row of a table's column listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRow<'a> {
    /// Column belongs to the table's primary key
    pub primary_key: bool,

    pub name: &'a str,
    pub code: &'a str,
    pub data_type: &'a str,

    /// Raw mandatory marker; the template decides how to display it
    pub mandatory: &'a str,

    pub default_value: &'a str,
    pub comment: &'a str,
}

impl<'a> ReportContext<'a> {
    /// Build the context for a model
    pub fn from_model(model: &'a Model) -> Self {
        Self {
            name: &model.name,
            author: &model.author,
            version: &model.version,
            file_name: &model.file_name,
            comment: &model.comment,
            dbms: model.dbms.name(),
            tables: model.tables.iter().map(TableView::from_table).collect(),
        }
    }

    /// Convert to MiniJinja value for rendering
    pub fn to_minijinja_value(&self) -> MinijinjaValue {
        MinijinjaValue::from_serialize(self)
    }
}

impl<'a> TableView<'a> {
    pub fn from_table(table: &'a Table) -> Self {
        let primary_key = PrimaryKeyColumns::for_table(table);

        Self {
            name: &table.name,
            code: &table.code,
            comment: &table.comment,
            columns: table
                .columns
                .iter()
                .map(|column| ColumnRow::new(column, primary_key.contains(column)))
                .collect(),
        }
    }
}

impl<'a> ColumnRow<'a> {
    fn new(column: &'a Column, primary_key: bool) -> Self {
        Self {
            primary_key,
            name: &column.name,
            code: &column.code,
            data_type: &column.data_type,
            mandatory: &column.mandatory,
            default_value: &column.default_value,
            comment: &column.comment,
        }
    }
}
