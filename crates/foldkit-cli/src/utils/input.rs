use crate::cli::SequenceInput;
use crate::error::{CliError, Result};
use std::path::Path;
use tracing::debug;

/// Joins the sequence lines of a text or FASTA file, skipping `>` headers and `;` comments.
pub fn sequence_from_text(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('>') && !line.starts_with(';'))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn read_sequence_file(path: &Path) -> Result<String> {
    debug!("Reading sequence from {:?}", path);
    let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(sequence_from_text(&content))
}

/// Returns the raw sequence text from the positional argument or the `--input` file.
pub fn read_sequence(input: &SequenceInput) -> Result<String> {
    match (&input.sequence, &input.input) {
        (Some(sequence), _) => Ok(sequence.clone()),
        (None, Some(path)) => read_sequence_file(path),
        (None, None) => Err(CliError::Argument(
            "a sequence or --input file is required".to_string(),
        )),
    }
}
