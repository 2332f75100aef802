//! PowerDesigner `.pdm` parsing
//!
//! Turns the XML object tree of a physical data model into the typed
//! [`pdm2_core::Document`].

pub mod parser;

pub use parser::{parse, parse_str, ParseError};
