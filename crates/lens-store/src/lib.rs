//! # lens-store
//!
//! Append-only signal archive for FounderLens.
//!
//! One JSON array file per [`SignalDomain`] under a root directory
//! (`market_momentum.json`, `labor_benchmarks.json`,
//! `sec_forensics_{TICKER}.json`). Each element is a [`SignalEntry`].
//!
//! ## Write model
//!
//! [`SignalStore::append`] is a read-modify-write over the whole file: read
//! the current array, push one entry, rewrite atomically (temp file + rename).
//! Two processes appending to the same domain concurrently can lose an
//! update; harvest runs hold an exclusive lock on the root directory.
//!
//! ## Read model
//!
//! Reads never fail on content. A missing file is an empty archive. A corrupt
//! file is an empty archive on read, and is moved aside to
//! `<file>.corrupt-<timestamp>` before the next append rewrites it.

mod archive;
mod error;

pub use error::StoreError;

use std::path::{Path, PathBuf};

use chrono::Utc;
use lens_core::{Metadata, SignalDomain, SignalEntry};

use crate::archive::ArchiveRead;

/// Domain-partitioned, append-only archive of harvested signals.
#[derive(Debug, Clone)]
pub struct SignalStore {
    root: PathBuf,
}

impl SignalStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    /// Open a store for reading only. The directory is not created; a missing
    /// directory reads as a set of empty archives.
    #[must_use]
    pub fn reader(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the archive files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Archive file path for `domain`.
    #[must_use]
    pub fn path_for(&self, domain: &SignalDomain) -> PathBuf {
        self.root.join(domain.file_name())
    }

    /// Append one observation to the domain's archive and return it.
    ///
    /// The capture timestamp is assigned here and never goes backwards
    /// relative to the last entry in the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on filesystem or serialization failure. A
    /// malformed existing archive is not an error.
    pub fn append(
        &self,
        domain: &SignalDomain,
        payload: Metadata,
        metadata: Option<Metadata>,
    ) -> Result<SignalEntry, StoreError> {
        std::fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        let path = self.path_for(domain);

        let mut entries = match archive::read(&path)? {
            ArchiveRead::Corrupt(reason) => {
                let moved = archive::quarantine(&path)?;
                tracing::warn!(
                    %domain,
                    %reason,
                    quarantined = %moved.display(),
                    "corrupt signal archive moved aside; starting a new archive"
                );
                Vec::new()
            }
            read => read.into_entries(),
        };

        let now = Utc::now();
        let captured_at = entries
            .last()
            .map_or(now, |last| last.captured_at.max(now));

        let entry = SignalEntry {
            captured_at,
            source_metadata: metadata,
            payload,
        };
        entries.push(entry.clone());

        archive::write(&path, &entries)?;
        tracing::info!(%domain, entries = entries.len(), "signal appended");
        Ok(entry)
    }

    /// All entries for `domain` in append order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] only when the file exists but cannot be
    /// read. Missing and corrupt archives return an empty `Vec`.
    pub fn entries(&self, domain: &SignalDomain) -> Result<Vec<SignalEntry>, StoreError> {
        let path = self.path_for(domain);
        let read = archive::read(&path)?;
        if let ArchiveRead::Corrupt(reason) = &read {
            tracing::warn!(%domain, %reason, "corrupt signal archive read as empty");
        }
        Ok(read.into_entries())
    }

    /// The most recently appended entry, or `None` for an empty archive.
    ///
    /// # Errors
    ///
    /// Same as [`Self::entries`].
    pub fn latest(&self, domain: &SignalDomain) -> Result<Option<SignalEntry>, StoreError> {
        Ok(self.entries(domain)?.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn payload(value: serde_json::Value) -> Metadata {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn open_creates_nested_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        let root = temp.path().join("research/data/signals");
        let store = SignalStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn open_is_idempotent() {
        let temp = TempDir::new().expect("tempdir should create");
        SignalStore::open(temp.path()).unwrap();
        SignalStore::open(temp.path()).unwrap();
    }

    #[test]
    fn append_then_latest_returns_payload() {
        let temp = TempDir::new().expect("tempdir should create");
        let store = SignalStore::open(temp.path()).unwrap();
        let meta = payload(json!({"source_date": "2011-03-14"}));

        let written = store
            .append(
                &SignalDomain::Market,
                payload(json!({"4. close": "54.08"})),
                Some(meta.clone()),
            )
            .unwrap();
        let latest = store.latest(&SignalDomain::Market).unwrap().unwrap();

        assert_eq!(latest, written);
        assert_eq!(latest.payload["4. close"], "54.08");
        assert_eq!(latest.source_metadata, Some(meta));
    }

    #[test]
    fn latest_on_missing_archive_is_none() {
        let temp = TempDir::new().expect("tempdir should create");
        let store = SignalStore::reader(temp.path().join("never-created"));
        assert!(store.latest(&SignalDomain::Labor).unwrap().is_none());
    }

    #[test]
    fn domains_do_not_share_files() {
        let temp = TempDir::new().expect("tempdir should create");
        let store = SignalStore::open(temp.path()).unwrap();
        store
            .append(&SignalDomain::regulatory("MSFT"), payload(json!({"ticker": "MSFT"})), None)
            .unwrap();

        assert!(store.latest(&SignalDomain::regulatory("UBER")).unwrap().is_none());
        assert!(store.latest(&SignalDomain::Market).unwrap().is_none());
        assert!(temp.path().join("sec_forensics_MSFT.json").exists());
    }

    #[test]
    fn capture_time_never_goes_backwards() {
        let temp = TempDir::new().expect("tempdir should create");
        let store = SignalStore::open(temp.path()).unwrap();
        let future = r#"[{"captured_at": "2999-01-01T00:00:00Z", "simulation_metadata": null, "data": {}}]"#;
        std::fs::write(store.path_for(&SignalDomain::Labor), future).unwrap();

        let entry = store
            .append(&SignalDomain::Labor, payload(json!({"value": "255.5"})), None)
            .unwrap();
        assert_eq!(entry.captured_at.to_rfc3339(), "2999-01-01T00:00:00+00:00");
    }
}
