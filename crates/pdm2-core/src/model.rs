//! Physical data model types
//!
//! Mirrors the object tree of a `.pdm` file. Every string is kept exactly as
//! it appeared in the source; identifiers and references are compared with
//! plain string equality.

use serde::{Deserialize, Serialize};

/// Root parse result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// The single model held by the file
    pub model: Model,
}

impl Document {
    /// Wrap a model
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    /// Consume the document, keeping only the model
    pub fn into_model(self) -> Model {
        self.model
    }
}

/// The whole schema file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Model {
    /// PowerDesigner object id (GUID)
    pub object_id: String,

    /// Display name
    pub name: String,

    /// Short code
    pub code: String,

    pub author: String,

    pub version: String,

    /// Free-text comment
    pub comment: String,

    /// Label shown as the report's file name; not part of the source file
    #[serde(default)]
    pub file_name: String,

    /// Target database engine
    pub dbms: Dbms,

    /// Tables in document order
    pub tables: Vec<Table>,
}

impl Model {
    /// Create an empty model with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the file name label
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Find a table by code
    pub fn find_table(&self, code: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.code == code)
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

/// DBMS reference, stored in the source as a shortcut to a shared definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dbms {
    pub shortcut: Shortcut,
}

impl Dbms {
    /// Display name of the target engine (e.g. "MySQL 5.0")
    pub fn name(&self) -> &str {
        &self.shortcut.name
    }
}

/// Named reference to an object defined outside the model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shortcut {
    pub object_id: String,
    pub name: String,
    pub code: String,
}

/// A database table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Document-local identifier (`Id` attribute)
    pub id: String,

    pub object_id: String,

    /// Display name
    pub name: String,

    /// Short code, used as the report anchor
    pub code: String,

    pub comment: String,

    /// Columns in document order
    pub columns: Vec<Column>,

    /// Keys in document order
    pub keys: Vec<Key>,

    /// Which of `keys` is the primary key, if any
    pub primary_key: Option<PrimaryKeyRef>,
}

impl Table {
    /// Create a table with a display name and code
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    /// Find a column by identifier
    pub fn find_column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Find a key by identifier
    pub fn find_key(&self, id: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.id == id)
    }

    /// The key designated as primary key, if the reference resolves
    pub fn primary_key(&self) -> Option<&Key> {
        self.primary_key
            .as_ref()
            .and_then(|pk| self.find_key(&pk.key_ref))
    }
}

/// A table column
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Column {
    /// Identifier, unique within the owning table
    pub id: String,

    pub object_id: String,

    pub name: String,

    pub code: String,

    /// Data type as written in the model (e.g. "varchar(64)")
    pub data_type: String,

    /// Identity marker, empty when the column is not an identity column
    pub identity: String,

    /// Raw `Column.Mandatory` marker: non-empty means NOT NULL
    pub mandatory: String,

    pub default_value: String,

    pub comment: String,
}

impl Column {
    /// Create a column with identifier, name and code
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    /// Set the data type
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Set the raw mandatory marker
    pub fn with_mandatory(mut self, mandatory: impl Into<String>) -> Self {
        self.mandatory = mandatory.into();
        self
    }

    /// Whether the column carries a NOT NULL marker
    pub fn is_mandatory(&self) -> bool {
        !self.mandatory.is_empty()
    }
}

/// A key constraint (primary, alternate or index key)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Key {
    pub id: String,
    pub object_id: String,
    pub name: String,
    pub code: String,

    /// Referenced columns in key order
    pub columns: Vec<KeyColumnRef>,
}

impl Key {
    /// Create a key over the given column identifiers
    pub fn new<I, S>(id: impl Into<String>, column_refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            columns: column_refs.into_iter().map(KeyColumnRef::new).collect(),
            ..Self::default()
        }
    }

    /// Whether the key references the given column identifier
    pub fn references(&self, column_id: &str) -> bool {
        self.columns.iter().any(|c| c.column_ref == column_id)
    }
}

/// Reference from a key to a column of the same table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyColumnRef {
    /// Identifier of the referenced column
    pub column_ref: String,
}

impl KeyColumnRef {
    pub fn new(column_ref: impl Into<String>) -> Self {
        Self {
            column_ref: column_ref.into(),
        }
    }
}

/// Reference from a table to the key acting as its primary key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PrimaryKeyRef {
    /// Identifier of the referenced key
    pub key_ref: String,
}

impl PrimaryKeyRef {
    pub fn new(key_ref: impl Into<String>) -> Self {
        Self {
            key_ref: key_ref.into(),
        }
    }
}
