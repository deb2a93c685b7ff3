//! JSONL event log
//!
//! Records are handed to a background task over an unbounded channel and
//! appended to the file one JSON object per line, so the session loop never
//! waits on disk.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use blockfall_core::{EngineConfig, LockEvent};
use blockfall_types::Command;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogRecord {
    Start { seed: u32, config: EngineConfig },
    Advance { ms: u32 },
    Command { command: Command },
    Lock(LockEvent),
}

impl LogRecord {
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

/// Handle to the background log writer
#[derive(Debug)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<LogRecord>,
    writer: JoinHandle<()>,
}

impl EventLog {
    /// Open `path` for appending and start the writer task.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("opening event log {}", path.display()))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();
        let writer = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(256);

            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if let Err(e) = file.write_all(&buf).await {
                    eprintln!("[blockfall] event log write failed: {}", e);
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Ok(Self { tx, writer })
    }

    /// Queue a record. Dropped silently once the writer has stopped.
    pub fn record(&self, rec: LogRecord) {
        let _ = self.tx.send(rec);
    }

    /// Flush everything queued and wait for the writer to finish.
    pub async fn close(self) -> anyhow::Result<()> {
        let Self { tx, writer } = self;
        drop(tx);
        writer.await.context("event log writer panicked")
    }
}
