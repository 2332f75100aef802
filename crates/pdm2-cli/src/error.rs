//! Errors surfaced by the `pdm2` binary

use std::path::PathBuf;

/// Every failure ends the process with a non-zero exit code
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// No input path, or an empty one; exits without a message
    #[error("no input file given")]
    MissingInput,

    #[error("{0}")]
    Config(#[from] pdm2_core::ConfigError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] pdm2_parser::ParseError),

    #[error(transparent)]
    Render(#[from] pdm2_report::RenderError),

    #[error("cannot determine the working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to ask for overwrite confirmation: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("not overwriting existing report {}", path.display())]
    OverwriteDeclined { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliError {
    /// Errors that end the process without printing anything
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::MissingInput)
    }
}
