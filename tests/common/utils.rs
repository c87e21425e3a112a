use std::path::PathBuf;
use std::sync::Arc;

use autofill_protocol::default_service;
use autofill_protocol::request::blocklist::Blocklist;
use autofill_protocol::request::parser::RequestParser;
use autofill_protocol::service::autofill_service::AutofillService;
use autofill_protocol::session::resume::{RecordingTarget, ResumeTarget};
use autofill_protocol::session::store::{FillSession, SessionStore};

pub const HOST_PACKAGE: &str = "com.onekeepass";

pub fn fixture(name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name]
        .iter()
        .collect();
    path.display().to_string()
}

pub fn parser() -> RequestParser {
    RequestParser::new(Blocklist::new(HOST_PACKAGE))
}

pub fn service() -> (AutofillService, Arc<dyn SessionStore>) {
    let session = FillSession::shared();
    (default_service(parser(), Arc::clone(&session)), session)
}

/// Register a recording UI with the service; keep the `Arc` alive while in use.
pub fn resume_ui(service: &AutofillService) -> Arc<RecordingTarget> {
    let recorder = Arc::new(RecordingTarget::new());
    let target: Arc<dyn ResumeTarget> = recorder.clone();
    service.on_ui_resumed(&target);
    recorder
}
