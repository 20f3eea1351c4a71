use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

/// Prints a progress message to stdout and mirrors it into `writer` when one
/// is given.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::warn!("failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

/// Writes the page to `path`, replacing any existing file.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write output file {}", path.display()))
}
