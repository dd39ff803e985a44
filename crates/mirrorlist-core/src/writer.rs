//! Mirrorlist file output.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::error::{ErrorContext, Result};

/// Replaces the file at `path` with `lines`, in order.
///
/// When `lines` is empty the file is never opened, so the last known-good
/// mirrorlist survives a run that found nothing usable. Otherwise the file is
/// truncated once and every line is written through a single handle.
///
/// Returns the number of lines written.
///
/// # Errors
///
/// Returns [`MirrorlistError::Io`](crate::error::MirrorlistError::Io) if the
/// file cannot be created or written. A failure halfway through leaves the
/// file partially rewritten.
pub fn write_mirrorlist<P, I>(path: P, lines: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let path = path.as_ref();
    let mut lines = lines.into_iter().peekable();

    if lines.peek().is_none() {
        debug!("No mirrors to write, leaving {} untouched", path.display());
        return Ok(0);
    }

    let file =
        File::create(path).with_context(|| format!("creating file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut written = 0;

    for line in lines {
        writer
            .write_all(line.as_ref().as_bytes())
            .with_context(|| format!("writing to file {}", path.display()))?;
        written += 1;
    }

    writer
        .flush()
        .with_context(|| format!("flushing file {}", path.display()))?;

    debug!("Wrote {} mirrors to {}", written, path.display());

    Ok(written)
}
