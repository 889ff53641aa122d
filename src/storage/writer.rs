//! Background persistence.
//!
//! All disk writes happen on one dedicated thread. The interactive side only
//! ever hands it a [`Snapshot`] through a channel and moves on; failures come
//! back on a separate error channel that the UI drains at its own pace.

use super::file::{SaveMode, save_entries};
use crate::entry::{Entry, Snapshot, StoreEvent, StoreObserver};
use crate::error::Error;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

enum WriterMessage {
    Save(Snapshot),
    Shutdown,
}

/// Cloneable handle for submitting snapshots to the writer thread.
#[derive(Clone)]
pub struct SaveQueue {
    tx: Sender<WriterMessage>,
}

impl SaveQueue {
    /// Fire and forget. If the writer is already gone the snapshot is dropped.
    pub fn submit(&self, snapshot: Snapshot) {
        if self.tx.send(WriterMessage::Save(snapshot)).is_err() {
            warn!("Persistence writer has stopped, snapshot dropped");
        }
    }
}

pub struct PersistenceWriter {
    queue: SaveQueue,
    errors: Receiver<Error>,
    handle: Option<JoinHandle<()>>,
    path: PathBuf,
}

impl PersistenceWriter {
    pub fn spawn(path: PathBuf, mode: SaveMode) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let (err_tx, err_rx) = mpsc::channel();
        let thread_path = path.clone();

        let handle = thread::Builder::new()
            .name("entries-writer".to_string())
            .spawn(move || run_writer(&thread_path, mode, rx, err_tx))?;

        info!(path = %path.display(), ?mode, "Persistence writer started");

        Ok(Self {
            queue: SaveQueue { tx },
            errors: err_rx,
            handle: Some(handle),
            path,
        })
    }

    pub fn queue(&self) -> SaveQueue {
        self.queue.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn errors(&self) -> &Receiver<Error> {
        &self.errors
    }

    /// Collect every save error reported so far without blocking.
    pub fn drain_errors(&self) -> Vec<Error> {
        self.errors.try_iter().collect()
    }

    /// Write out everything already queued, then stop the thread.
    pub fn shutdown(mut self) -> Vec<Error> {
        self.stop();
        self.drain_errors()
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.queue.tx.send(WriterMessage::Shutdown);
            if handle.join().is_err() {
                error!("Persistence writer thread panicked");
            }
        }
    }
}

impl Drop for PersistenceWriter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_writer(path: &Path, mode: SaveMode, rx: Receiver<WriterMessage>, errors: Sender<Error>) {
    while let Ok(message) = rx.recv() {
        let mut latest = match message {
            WriterMessage::Save(snapshot) => snapshot,
            WriterMessage::Shutdown => break,
        };

        // Only the newest queued snapshot matters.
        let mut stop_after = false;
        while let Ok(next) = rx.try_recv() {
            match next {
                WriterMessage::Save(snapshot) => latest = snapshot,
                WriterMessage::Shutdown => {
                    stop_after = true;
                    break;
                }
            }
        }

        match save_entries(path, &latest, mode) {
            Ok(()) => debug!(path = %path.display(), entries = latest.len(), "Entries saved"),
            Err(e) => {
                error!(error = %e, "Failed to save entries");
                let _ = errors.send(e);
            }
        }

        if stop_after {
            break;
        }
    }
    debug!("Persistence writer stopped");
}

/// Store subscriber that queues a fresh snapshot on every change.
pub struct AutoSave {
    queue: SaveQueue,
}

impl AutoSave {
    pub fn new(queue: SaveQueue) -> Self {
        Self { queue }
    }
}

impl StoreObserver for AutoSave {
    fn on_change(&mut self, event: &StoreEvent, entries: &[Entry]) {
        debug!(?event, "Queueing save");
        self.queue.submit(Snapshot::from_entries(entries));
    }
}
