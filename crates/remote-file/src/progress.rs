use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

/// Callback invoked with a fresh snapshot after every progress update.
pub type ProgressCallback = Box<dyn Fn(TransferSnapshot) + Send + Sync>;

/// Point-in-time view of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSnapshot {
    pub total_bytes: u64,
    pub completed_bytes: u64,
}

impl TransferSnapshot {
    /// Completed share as a percentage (0-100).
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.completed_bytes as f64 / self.total_bytes as f64 * 100.0
    }
}

/// Progress sink updated by the transfer engines (thread-safe).
///
/// `completed` only ever counts bytes the server has acknowledged, and
/// it is monotonically non-decreasing for the lifetime of a transfer.
pub struct TransferProgress {
    state: RwLock<ProgressState>,
    callback: Mutex<Option<ProgressCallback>>,
}

struct ProgressState {
    total: u64,
    completed: u64,
}

impl TransferProgress {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ProgressState {
                total: 0,
                completed: 0,
            }),
            callback: Mutex::new(None),
        }
    }

    /// Registers a callback fired after every update.
    pub fn set_callback(&self, callback: ProgressCallback) {
        *self.callback.lock().unwrap() = Some(callback);
    }

    /// Resets the sink for a transfer of `total` bytes.
    pub(crate) fn begin(&self, total: u64) {
        {
            let mut s = self.state.write().unwrap();
            s.total = total;
            s.completed = 0;
        }
        self.notify();
    }

    /// Records `bytes` more acknowledged by the server.
    pub(crate) fn advance(&self, bytes: u64) {
        {
            let mut s = self.state.write().unwrap();
            s.completed += bytes;
        }
        self.notify();
    }

    /// Pins the sink to exactly `total` complete, independent of any
    /// rounding in the chunk loops.
    pub(crate) fn finish(&self, total: u64) {
        {
            let mut s = self.state.write().unwrap();
            s.total = total;
            s.completed = total;
        }
        self.notify();
    }

    pub fn snapshot(&self) -> TransferSnapshot {
        let s = self.state.read().unwrap();
        TransferSnapshot {
            total_bytes: s.total,
            completed_bytes: s.completed,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.state.read().unwrap().total
    }

    pub fn completed_bytes(&self) -> u64 {
        self.state.read().unwrap().completed
    }

    pub fn is_complete(&self) -> bool {
        let s = self.state.read().unwrap();
        s.completed >= s.total
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        if let Some(cb) = self.callback.lock().unwrap().as_ref() {
            cb(snapshot);
        }
    }
}

impl Default for TransferProgress {
    fn default() -> Self {
        Self::new()
    }
}
