//! Append-only JSON Lines audit log shared between processes.

use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use fs4::fs_std::FileExt;
use log::{debug, warn};

use crate::error::{Result, SortError};

use super::{record::AuditRecord, sink::AuditSink};

/// Default location of the audit log, relative to the working directory.
pub const DEFAULT_AUDIT_LOG: &str = "errors/error_log.jsonl";

/// Bounded exponential backoff for lock conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the failed `attempt` (1-based): doubles each
    /// time, capped at `max_delay`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Audit sink writing one JSON object per line.
///
/// Writers hold an exclusive OS lock on the log file itself for the
/// duration of an append. The lock goes away with the file handle, so a
/// crashed writer never blocks later ones. A held lock is retried per the
/// [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct JsonlAuditLog {
    path: PathBuf,
    retry: RetryPolicy,
}

impl JsonlAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every record in the log. A missing log reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is not a
    /// valid record.
    pub fn read_all(&self) -> Result<Vec<AuditRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(SortError::from))
            .collect()
    }

    /// Open the log for appending and take its exclusive lock, retrying
    /// while another writer holds it.
    fn open_locked(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=attempts {
            if file.try_lock_exclusive()? {
                return Ok(file);
            }
            if attempt < attempts {
                let delay = self.retry.delay_after(attempt);
                warn!(
                    "Audit log {} is locked, retrying in {:?} (attempt {}/{})",
                    self.path.display(),
                    delay,
                    attempt,
                    attempts
                );
                thread::sleep(delay);
            }
        }

        Err(SortError::LockContention {
            path: self.path.clone(),
            attempts,
        })
    }
}

impl AuditSink for JsonlAuditLog {
    fn append(&self, record: &AuditRecord) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        // Released when `file` is dropped.
        let mut file = self.open_locked()?;
        file.write_all(line.as_bytes())?;

        debug!(
            "Appended '{}' record to {}",
            record.operation,
            self.path.display()
        );
        Ok(())
    }
}
