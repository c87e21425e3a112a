use std::sync::Mutex;

use crate::response::response_model::CompletionOutcome;

/// The authenticated UI surface that must be finished to answer the platform.
///
/// The session only keeps a weak handle to it.
pub trait ResumeTarget: Send + Sync {
    fn deliver(&self, outcome: CompletionOutcome);
}

/// Keeps every delivered outcome. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    delivered: Mutex<Vec<CompletionOutcome>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<CompletionOutcome> {
        match self.delivered.lock() {
            Ok(d) => d.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<CompletionOutcome> {
        self.delivered().pop()
    }
}

impl ResumeTarget for RecordingTarget {
    fn deliver(&self, outcome: CompletionOutcome) {
        let mut delivered = match self.delivered.lock() {
            Ok(d) => d,
            Err(poisoned) => poisoned.into_inner(),
        };
        delivered.push(outcome);
    }
}
