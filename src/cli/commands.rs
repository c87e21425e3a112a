use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::request::parser::RequestParser;
use crate::request::request_model::FillRequest;
use crate::service::autofill_service::AutofillService;
use crate::service::error::{AutofillError, AutofillResult};
use crate::session::resume::{RecordingTarget, ResumeTarget};
use crate::tree::classifier::classify_snapshot;
use crate::tree::node::StructureSnapshot;

// ============================================================================
// Input helpers
// ============================================================================

pub fn read_json<T: DeserializeOwned>(path: &str) -> AutofillResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| AutofillError::Io {
        path: path.to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| AutofillError::Json {
        context: path.to_string(),
        source,
    })
}

fn to_pretty<T: Serialize>(context: &str, value: &T) -> AutofillResult<String> {
    serde_json::to_string_pretty(value).map_err(|source| AutofillError::Json {
        context: context.to_string(),
        source,
    })
}

// ============================================================================
// classify subcommand
// ============================================================================

pub fn cmd_classify(snapshot_path: &str) -> AutofillResult<String> {
    let snapshot: StructureSnapshot = read_json(snapshot_path)?;
    let pages = classify_snapshot(&snapshot);
    to_pretty("classify", &pages)
}

// ============================================================================
// parse subcommand
// ============================================================================

/// Parser only; the session is left untouched.
pub fn cmd_parse(parser: &RequestParser, request_path: &str) -> AutofillResult<String> {
    let request: FillRequest = read_json(request_path)?;
    to_pretty("parse", &parser.parse(&request))
}

// ============================================================================
// offer subcommand
// ============================================================================

pub fn cmd_offer(service: &AutofillService, request_path: &str) -> AutofillResult<String> {
    let request: FillRequest = read_json(request_path)?;
    to_pretty("offer", &service.on_fill_request(&request))
}

// ============================================================================
// complete subcommand
// ============================================================================

/// Offer, then play the authenticated UI: resume, ask for the caller, complete.
pub fn cmd_complete(
    service: &AutofillService,
    request_path: &str,
    username: Option<&str>,
    password: Option<&str>,
    verbose: u8,
) -> AutofillResult<String> {
    let request: FillRequest = read_json(request_path)?;

    if service.on_fill_request(&request).is_none() {
        return to_pretty("complete", &serde_json::json!({ "offered": false }));
    }

    let recorder = Arc::new(RecordingTarget::new());
    let target: Arc<dyn ResumeTarget> = recorder.clone();
    service.on_ui_resumed(&target);

    let caller = service.caller_info();
    if verbose > 0 {
        eprintln!("Authenticated UI filling for {:?} (search term '{}')", caller.uri, caller.search_term);
    }

    let outcome = service.complete(username, password);
    service.on_ui_paused();

    to_pretty(
        "complete",
        &serde_json::json!({
            "offered": true,
            "caller": caller,
            "outcome": outcome,
            "delivered": recorder.delivered(),
        }),
    )
}
