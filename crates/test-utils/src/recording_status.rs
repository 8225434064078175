use std::sync::{Arc, Mutex};

use noticer::exec::StatusSink;
use noticer::exec::status::status_line;
use noticer::types::{CommandSpec, Verdict};

/// Status sink that remembers every verdict instead of printing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingStatus {
    verdicts: Arc<Mutex<Vec<Verdict>>>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdicts(&self) -> Vec<Verdict> {
        self.verdicts.lock().unwrap().clone()
    }

    /// Uncoloured banners in report order.
    pub fn lines(&self) -> Vec<String> {
        self.verdicts()
            .into_iter()
            .map(|v| status_line(v, false))
            .collect()
    }
}

impl StatusSink for RecordingStatus {
    fn report(&self, _command: &CommandSpec, verdict: Verdict) {
        self.verdicts.lock().unwrap().push(verdict);
    }
}
