//! Utilities for creating `rodio` sinks from audio files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::{DuabookError, Result};

/// Create a paused `Sink` playing the file at `path` from the start.
pub(super) fn create_sink(stream: &OutputStream, path: &Path) -> Result<Sink> {
    let file = File::open(path)
        .map_err(|e| DuabookError::Audio(format!("failed to open {}: {e}", path.display())))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| DuabookError::Audio(format!("failed to decode {}: {e}", path.display())))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
