//! pdm2 Core
//!
//! Typed model of a PowerDesigner physical data model, the primary-key
//! resolver used by the report, and the tool's configuration schema.

pub mod model;
pub mod primary_key;
pub mod config;

pub use model::{Document, Model, Dbms, Shortcut, Table, Column, Key, KeyColumnRef, PrimaryKeyRef};
pub use primary_key::{PrimaryKeyColumns, is_primary_key_column};
pub use config::{Config, ConfigError, OverwritePolicy};
