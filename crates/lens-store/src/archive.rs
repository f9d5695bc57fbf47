//! Tolerant archive file reads and atomic rewrites.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use lens_core::SignalEntry;

use crate::error::StoreError;

/// Result of reading one archive file.
#[derive(Debug)]
pub(crate) enum ArchiveRead {
    /// No file, or a file with only whitespace.
    Missing,
    Valid(Vec<SignalEntry>),
    /// Unparseable contents. Carries the parser message.
    Corrupt(String),
}

impl ArchiveRead {
    pub(crate) fn into_entries(self) -> Vec<SignalEntry> {
        match self {
            Self::Valid(entries) => entries,
            Self::Missing | Self::Corrupt(_) => Vec::new(),
        }
    }
}

/// Read an archive, classifying absence and corruption instead of failing.
///
/// A single JSON object with the entry shape (the pre-array archive format)
/// reads as a one-element archive.
pub(crate) fn read(path: &Path) -> Result<ArchiveRead, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ArchiveRead::Missing),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ArchiveRead::Missing);
    }

    match serde_json::from_slice::<Vec<SignalEntry>>(&bytes) {
        Ok(entries) => Ok(ArchiveRead::Valid(entries)),
        Err(array_err) => match serde_json::from_slice::<SignalEntry>(&bytes) {
            Ok(entry) => Ok(ArchiveRead::Valid(vec![entry])),
            Err(_) => Ok(ArchiveRead::Corrupt(array_err.to_string())),
        },
    }
}

/// Move a corrupt archive aside so its bytes survive the rewrite.
///
/// Returns the quarantine path.
pub(crate) fn quarantine(path: &Path) -> Result<PathBuf, StoreError> {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6fZ");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = path.with_file_name(format!("{file_name}.corrupt-{stamp}"));
    std::fs::rename(path, &target).map_err(|e| StoreError::io(path, e))?;
    Ok(target)
}

/// Replace the archive with `entries`, via a temp file in the same directory.
pub(crate) fn write(path: &Path, entries: &[SignalEntry]) -> Result<(), StoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;

    serde_json::to_writer_pretty(tmp.as_file_mut(), entries)?;
    tmp.as_file_mut()
        .flush()
        .map_err(|e| StoreError::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}
