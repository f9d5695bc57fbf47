//! Exclusive harvest lock over a signal directory.
//!
//! Archive appends rewrite whole files, so only one harvest may write a
//! signal directory at a time. The lock is an OS advisory lock on
//! `.harvest.lock`. The kernel releases it when the holder exits, however it
//! exits, so a leftover file never blocks the next harvest. The file is kept
//! between runs and records the pid of the last holder for error messages.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;

pub const LOCK_FILE: &str = ".harvest.lock";

const DEFAULT_WAIT: Duration = Duration::from_secs(60);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Held for the duration of a harvest. Dropping it releases the lock.
#[derive(Debug)]
pub struct HarvestLock {
    file: File,
    path: PathBuf,
}

impl HarvestLock {
    /// Take the lock in `signals_dir`, waiting up to a minute for a running
    /// harvest to finish.
    pub async fn acquire(signals_dir: &Path) -> anyhow::Result<Self> {
        Self::acquire_within(signals_dir, DEFAULT_WAIT).await
    }

    /// Take the lock, waiting at most `wait`.
    pub async fn acquire_within(signals_dir: &Path, wait: Duration) -> anyhow::Result<Self> {
        std::fs::create_dir_all(signals_dir)
            .with_context(|| format!("failed to create signal directory {}", signals_dir.display()))?;
        let path = signals_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("failed to open harvest lock {}", path.display()))?;

        let deadline = Instant::now() + wait;
        loop {
            match file.try_lock() {
                Ok(()) => break,
                Err(TryLockError::WouldBlock) if Instant::now() < deadline => {
                    tracing::debug!(lock = %path.display(), "harvest lock busy, waiting");
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(TryLockError::WouldBlock) => {
                    anyhow::bail!(
                        "another harvest (pid {}) still holds {} after {}s",
                        last_holder(&path),
                        path.display(),
                        wait.as_secs()
                    );
                }
                Err(TryLockError::Error(e)) => {
                    return Err(e).with_context(|| format!("failed to lock {}", path.display()));
                }
            }
        }

        record_holder(&file).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(lock = %path.display(), "harvest lock acquired");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for HarvestLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Replace the file contents with this process id.
fn record_holder(file: &File) -> std::io::Result<()> {
    file.set_len(0)?;
    let mut writer = file;
    writeln!(writer, "{}", std::process::id())?;
    writer.flush()
}

fn last_holder(path: &Path) -> String {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| String::from("unknown"))
}
