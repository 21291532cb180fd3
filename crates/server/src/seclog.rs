//! Append-only security log.
//!
//! Audit trail of authentication and data-mutation events, written as
//! line-delimited JSON to a flat file. Writes are fire-and-forget: handlers
//! enqueue entries on a channel and a single writer task appends them in
//! order, so concurrent requests never interleave partial lines. Write
//! failures are reported via `tracing` and swallowed - they are never
//! surfaced to the HTTP client.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot};

use minicrm_core::SecurityLogEntry;

/// Errors reading the security log back.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The log file could not be read.
    #[error("failed to read security log: {0}")]
    Read(#[from] std::io::Error),
}

/// Commands understood by the writer task.
enum Command {
    Append(SecurityLogEntry),
    /// Acknowledge once every previously enqueued entry is on disk.
    Flush(oneshot::Sender<()>),
}

/// Handle to the security log.
///
/// Cheaply cloneable; all clones feed the same writer task.
#[derive(Clone)]
pub struct SecurityLog {
    tx: mpsc::UnboundedSender<Command>,
    path: PathBuf,
}

impl SecurityLog {
    /// Spawn the writer task and return a handle to it.
    ///
    /// The file (and its parent directory) is created on first write, not
    /// here, so constructing the log never fails.
    #[must_use]
    pub fn start(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(writer_task(path.clone(), rx));
        Self { tx, path }
    }

    /// Record a security event. Best effort and non-blocking.
    pub fn record(&self, event: impl Into<String>) {
        let entry = SecurityLogEntry::now(event);
        if self.tx.send(Command::Append(entry)).is_err() {
            tracing::error!("security log writer task has stopped, dropping entry");
        }
    }

    /// Wait until every entry recorded before this call has been written.
    ///
    /// Used on graceful shutdown and by tests that read the file back.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Flush(ack)).is_ok() {
            // The writer dropping the ack just means it already exited.
            let _ = done.await;
        }
    }

    /// Read all entries currently in the log file, in order.
    ///
    /// The file is streamed line by line rather than slurped. Malformed
    /// lines (e.g. a partial trailing line after a crash) are skipped with
    /// a warning. A missing file reads as an empty log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the file exists but cannot be read.
    pub async fn read_entries(&self) -> Result<Vec<SecurityLogEntry>, StorageError> {
        let file = match fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut lines = BufReader::new(file).lines();
        let mut entries = Vec::new();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SecurityLogEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed security log line");
                }
            }
        }
        Ok(entries)
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Consume commands until every `SecurityLog` clone has been dropped.
async fn writer_task(path: PathBuf, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Append(entry) => {
                if let Err(e) = append_entry(&path, &entry).await {
                    tracing::error!(error = %e, path = %path.display(), "Error writing to security log");
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

/// Append one entry as a newline-terminated JSON line.
async fn append_entry(path: &Path, entry: &SecurityLogEntry) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let mut line = serde_json::to_string(entry).map_err(std::io::Error::other)?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
