use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::request::parser::UnfillableReason;
use crate::response::response_model::CompletionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStage {
    Parse,
    Offer,
    CallerQuery,
    Complete,
    Lifecycle,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub stage: TraceStage,

    pub uri: Option<String>,

    pub field_count: Option<usize>,
    pub ignored_count: Option<usize>,

    pub decision: Option<String>,
    pub suppression_reason: Option<String>,
}

impl TraceEvent {
    pub fn now(stage: TraceStage) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            stage,
            uri: None,
            field_count: None,
            ignored_count: None,
            decision: None,
            suppression_reason: None,
        }
    }

    pub fn with_uri(mut self, uri: Option<&str>) -> Self {
        self.uri = uri.map(str::to_string);
        self
    }

    pub fn with_counts(mut self, fields: usize, ignored: usize) -> Self {
        self.field_count = Some(fields);
        self.ignored_count = Some(ignored);
        self
    }

    pub fn with_decision(mut self, decision: impl ToString) -> Self {
        self.decision = Some(decision.to_string());
        self
    }

    pub fn with_suppression(mut self, reason: UnfillableReason) -> Self {
        self.suppression_reason = Some(reason.as_str().to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: &CompletionOutcome) -> Self {
        match outcome {
            CompletionOutcome::Filled(result) => {
                self.decision = Some("filled".to_string());
                self.field_count = Some(result.values.len());
            }
            CompletionOutcome::Cancelled => {
                self.decision = Some("cancelled".to_string());
            }
        }
        self
    }
}
