use crate::error::{CliError, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes `text` to `path`, or to stdout when no path is given.
pub fn write_text(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| CliError::FileWriting {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
            info!("Wrote {} bytes to {:?}", text.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
