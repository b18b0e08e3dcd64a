// Feeds clipboard snapshots to a ConversionManager on one dedicated worker thread,
// so conversions happen in the order the clipboard changed.

use crate::convert::ConversionManager;
use std::fmt;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

#[derive(Debug)]
pub enum WatchError {
    WorkerStopped,
    WorkerPanicked,
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchError::WorkerStopped => write!(f, "Conversion worker is no longer running"),
            WatchError::WorkerPanicked => write!(f, "Conversion worker panicked"),
        }
    }
}

impl std::error::Error for WatchError {}

/// Remembers the last snapshot so unchanged clipboard content is not converted twice
#[derive(Debug, Default)]
pub struct SnapshotDiff {
    last: Option<String>,
}

impl SnapshotDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the snapshot differs from the previous one
    pub fn changed(&mut self, snapshot: &str) -> bool {
        if self.last.as_deref() == Some(snapshot) {
            return false;
        }
        self.last = Some(snapshot.to_string());
        true
    }
}

pub struct ClipboardWatcher {
    snapshots: Sender<String>,
    worker: JoinHandle<usize>,
}

impl ClipboardWatcher {
    /// Start the worker; results reach the caller through the manager's event channel
    pub fn spawn(manager: ConversionManager) -> Self {
        let (snapshots, incoming) = mpsc::channel::<String>();

        let worker = thread::spawn(move || {
            let mut diff = SnapshotDiff::new();
            let mut processed = 0;

            for snapshot in incoming {
                if !diff.changed(&snapshot) {
                    log::trace!("Clipboard unchanged, skipping");
                    continue;
                }
                manager.process(&snapshot);
                processed += 1;
            }

            processed
        });

        Self { snapshots, worker }
    }

    /// Hand over the current clipboard content
    pub fn push(&self, snapshot: impl Into<String>) -> Result<(), WatchError> {
        self.snapshots
            .send(snapshot.into())
            .map_err(|_| WatchError::WorkerStopped)
    }

    /// Stop accepting snapshots, wait for the queue to drain.
    /// Returns how many snapshots were converted.
    pub fn finish(self) -> Result<usize, WatchError> {
        drop(self.snapshots);
        self.worker.join().map_err(|_| WatchError::WorkerPanicked)
    }
}
