//! Writing the report to disk
//!
//! The report is named after the input file with `.html` appended, keeping
//! the original extension (`demo.pdm` becomes `demo.pdm.html`).

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use pdm2_core::OverwritePolicy;
use crate::error::CliError;

/// Location of the report for `input` inside `output_dir`
pub fn target_path(output_dir: &Path, input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_name().unwrap_or(input.as_os_str()));
    name.push(".html");
    output_dir.join(name)
}

/// Write `html` to `target`, applying the overwrite policy when it exists
///
/// `answers` and `prompt` are only used by [`OverwritePolicy::Ask`].
pub fn write_report<R: BufRead, W: Write>(
    target: &Path,
    html: &str,
    policy: OverwritePolicy,
    answers: &mut R,
    prompt: &mut W,
) -> Result<(), CliError> {
    if target.exists() {
        let overwrite = match policy {
            OverwritePolicy::Always => true,
            OverwritePolicy::Never => false,
            OverwritePolicy::Ask => confirm_overwrite(target, answers, prompt)?,
        };

        if !overwrite {
            return Err(CliError::OverwriteDeclined {
                path: target.to_path_buf(),
            });
        }

        tracing::info!(path = %target.display(), "overwriting existing report");
    }

    std::fs::write(target, html).map_err(|source| CliError::Write {
        path: target.to_path_buf(),
        source,
    })
}

/// Ask whether to overwrite; only a first word of "n" declines
fn confirm_overwrite<R: BufRead, W: Write>(
    target: &Path,
    answers: &mut R,
    prompt: &mut W,
) -> Result<bool, CliError> {
    write!(
        prompt,
        "Target file [{}] already exists, overwrite? (y/n)",
        target.display()
    )
    .and_then(|_| prompt.flush())
    .map_err(CliError::Prompt)?;

    let mut answer = String::new();
    answers.read_line(&mut answer).map_err(CliError::Prompt)?;

    let declined = answer
        .split_whitespace()
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case("n"));

    Ok(!declined)
}
