//! Defines structures and types for progress reporting.

use std::sync::Arc;
use tokio::sync::Mutex;

/// Represents a snapshot of the progress during a long-running operation.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// A description of the current stage (e.g., "Unpacking sense tables").
    pub stage_description: String,
    /// Number of items processed in the current stage.
    pub current_item: u64,
    /// Total number of items expected in the current stage (if calculable).
    pub total_items: Option<u64>,
    /// An optional message providing more context (e.g., "adjective.json").
    pub message: Option<String>,
}

/// Type alias for the progress callback function.
///
/// The callback receives a `ProgressUpdate` and returns `true` to continue.
/// The return value is currently ignored; acquisition cannot be cancelled.
pub type ProgressCallback = Box<dyn FnMut(ProgressUpdate) -> bool + Send + Sync>;

/// Shared handle to a callback, cloned into each acquisition step.
pub type ProgressReporter = Arc<Mutex<ProgressCallback>>;

impl ProgressUpdate {
    pub fn new(
        stage_description: String,
        current_item: u64,
        total_items: Option<u64>,
        message: Option<String>,
    ) -> Self {
        ProgressUpdate {
            stage_description,
            current_item,
            total_items,
            message,
        }
    }

    /// Creates a new progress update for the start of a stage.
    pub fn new_stage(description: String, total_items: Option<u64>) -> Self {
        Self::new(description, 0, total_items, None)
    }
}

pub fn reporter_from_callback(callback: ProgressCallback) -> ProgressReporter {
    Arc::new(Mutex::new(callback))
}

pub async fn report_progress_async(reporter: &ProgressReporter, update: ProgressUpdate) {
    let mut callback = reporter.lock().await;
    let _ = (*callback)(update);
}
