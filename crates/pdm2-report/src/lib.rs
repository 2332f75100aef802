//! HTML report rendering
//!
//! This crate handles:
//! - The embedded report template
//! - Building the template view from a parsed model
//! - Rendering with HTML auto-escaping

pub mod context;
pub mod renderer;

pub use context::{ReportContext, TableView, ColumnRow};
pub use renderer::{ReportRenderer, RenderError, render, REPORT_TEMPLATE};
