// K6LogView - app/load.rs
//
// File-read lifecycle management. Reads the selected log file on a
// background thread and sends the text to the UI thread via an mpsc channel.
//
// Architecture:
//   - `LoadManager` lives on the UI thread; `run_load` runs on a reader thread.
//   - One long-lived channel is shared by every reader thread. Each request
//     bumps `generation`; `poll_progress` drops messages from older requests,
//     so a slow read of a previous file can never overwrite a newer one.
//   - Parsing is NOT done here: the UI thread parses the text when it
//     consumes `LoadProgress::Loaded`.

use crate::core::model::LoadProgress;
use crate::platform;
use std::path::PathBuf;
use std::sync::mpsc;

/// Manages background file reads.
pub struct LoadManager {
    progress_tx: mpsc::Sender<LoadProgress>,
    progress_rx: mpsc::Receiver<LoadProgress>,

    /// Generation of the most recent request. Messages carrying any other
    /// value are stale.
    generation: u64,

    /// Whether the current generation's result is still outstanding.
    pending: bool,
}

impl LoadManager {
    pub fn new() -> Self {
        let (progress_tx, progress_rx) = mpsc::channel();
        Self {
            progress_tx,
            progress_rx,
            generation: 0,
            pending: false,
        }
    }

    /// Start reading `path` on a background thread.
    ///
    /// Any read still in flight is superseded. Returns the new generation.
    pub fn start_load(&mut self, path: PathBuf) -> u64 {
        self.generation += 1;
        self.pending = true;
        let generation = self.generation;
        let tx = self.progress_tx.clone();

        tracing::info!(path = %path.display(), generation, "Load started");

        std::thread::spawn(move || run_load(generation, path, tx));
        generation
    }

    /// Invalidate any outstanding read without starting a new one.
    pub fn cancel(&mut self) {
        if self.pending {
            tracing::debug!(generation = self.generation, "Load superseded");
        }
        self.generation += 1;
        self.pending = false;
    }

    /// Whether a read for the current generation has not reported back yet.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Poll for progress messages without blocking.
    ///
    /// Returns only messages belonging to the current generation.
    pub fn poll_progress(&mut self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.progress_rx.try_recv() {
            if msg.generation() == self.generation {
                self.pending = false;
                messages.push(msg);
            } else {
                tracing::debug!(
                    stale = msg.generation(),
                    current = self.generation,
                    "Discarding stale load result"
                );
            }
        }
        messages
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one file and report the outcome. Runs on a reader thread.
fn run_load(generation: u64, path: PathBuf, tx: mpsc::Sender<LoadProgress>) {
    let msg = match platform::fs::read_file_lossy(&path) {
        Ok(text) => {
            tracing::debug!(path = %path.display(), bytes = text.len(), "File read");
            LoadProgress::Loaded {
                generation,
                path,
                text,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "File read failed");
            LoadProgress::Failed {
                generation,
                path,
                error: e.to_string(),
            }
        }
    };
    // Receiver dropped means the UI has closed; nothing left to do.
    let _ = tx.send(msg);
}
