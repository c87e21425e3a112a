use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    request::{
        caller::caller_search_term,
        parser::{ParseOutcome, RequestParser},
        request_model::FillRequest,
    },
    response::{
        builder::{OfferSettings, ResponseBuilder, build_completion},
        response_model::{CompletionOutcome, FillResponse},
    },
    service::{
        command::{CALLER_INFO, COMPLETE_AUTOFILL, CallerInfo, login_selection},
        error::{AutofillError, AutofillResult},
    },
    session::{resume::ResumeTarget, store::SessionStore},
    trace::{
        logger::TraceLogger,
        trace::{TraceEvent, TraceStage},
    },
};

/// Both protocol phases over one shared session store.
///
/// Phase one (`on_fill_request`) runs inside the platform's fill callback.
/// Phase two (`complete`) runs from the authenticated UI once the user
/// picked an entry; it finishes whichever UI last called `on_ui_resumed`.
pub struct AutofillService {
    parser: RequestParser,
    builder: ResponseBuilder,
    session: Arc<dyn SessionStore>,
    tracer: TraceLogger,
}

impl AutofillService {
    pub fn new(
        parser: RequestParser,
        settings: OfferSettings,
        session: Arc<dyn SessionStore>,
        tracer: TraceLogger,
    ) -> Self {
        Self {
            parser,
            builder: ResponseBuilder::new(Arc::clone(&session), settings),
            session,
            tracer,
        }
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    // ------------------------------------------------------------------------
    // Phase one: offer
    // ------------------------------------------------------------------------

    /// `None` means the platform gets no response for this screen.
    pub fn on_fill_request(&self, request: &FillRequest) -> Option<FillResponse> {
        match self.parser.evaluate(request) {
            ParseOutcome::Unfillable { reason, uri } => {
                self.tracer.log(
                    &TraceEvent::now(TraceStage::Parse)
                        .with_uri(uri.as_deref())
                        .with_decision("unfillable")
                        .with_suppression(reason),
                );
                None
            }
            ParseOutcome::Fillable(fillable) => {
                self.tracer.log(
                    &TraceEvent::now(TraceStage::Parse)
                        .with_uri(fillable.uri.as_deref())
                        .with_counts(fillable.dataset.fields.len(), fillable.ignorable_ids.len())
                        .with_decision("fillable"),
                );

                let response = self.builder.build_offer(fillable);

                self.tracer.log(
                    &TraceEvent::now(TraceStage::Offer)
                        .with_counts(response.dataset.values.len(), response.ignored_ids.len())
                        .with_decision(if response.dataset.inline_presentation.is_some() {
                            "offered_inline"
                        } else {
                            "offered"
                        }),
                );
                Some(response)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Authenticated UI
    // ------------------------------------------------------------------------

    /// Caller URI of the pending offer; only the first read after an offer sees it.
    pub fn current_caller_uri(&self) -> Option<String> {
        let uri = self.session.take_caller_uri();
        self.tracer.log(
            &TraceEvent::now(TraceStage::CallerQuery)
                .with_uri(uri.as_deref())
                .with_decision(if uri.is_some() { "served" } else { "empty" }),
        );
        uri
    }

    pub fn caller_info(&self) -> CallerInfo {
        let uri = self.current_caller_uri();
        CallerInfo {
            search_term: caller_search_term(uri.as_deref()),
            uri,
        }
    }

    pub fn on_ui_resumed(&self, target: &Arc<dyn ResumeTarget>) {
        self.session.set_resume_target(target);
        self.tracer
            .log(&TraceEvent::now(TraceStage::Lifecycle).with_decision("resumed"));
    }

    /// UI went away; a pending offer stays for a retry.
    pub fn on_ui_paused(&self) {
        self.session.clear_resume_target();
        self.tracer
            .log(&TraceEvent::now(TraceStage::Lifecycle).with_decision("paused"));
    }

    // ------------------------------------------------------------------------
    // Phase two: complete
    // ------------------------------------------------------------------------

    /// Deliver the selected credentials to the active UI.
    ///
    /// Returns what was delivered, or `None` when no UI is active.
    pub fn complete(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Option<CompletionOutcome> {
        let Some(target) = self.session.resume_target() else {
            warn!("completion requested with no active authenticated UI");
            self.tracer.log(
                &TraceEvent::now(TraceStage::Complete).with_decision("no_resume_target"),
            );
            return None;
        };

        // Taken under one lock so an offer set meanwhile survives.
        let pending = self.session.take();
        let outcome = match build_completion(pending.as_ref(), username, password) {
            Some(result) => CompletionOutcome::Filled(result),
            None => CompletionOutcome::Cancelled,
        };

        debug!(outcome = ?outcome, "delivering completion");
        target.deliver(outcome.clone());

        self.tracer
            .log(&TraceEvent::now(TraceStage::Complete).with_outcome(&outcome));
        Some(outcome)
    }

    // ------------------------------------------------------------------------
    // JSON command entry point
    // ------------------------------------------------------------------------

    pub fn invoke(&self, command: &str, json_args: &str) -> AutofillResult<Value> {
        match command {
            COMPLETE_AUTOFILL => {
                let (username, password) = login_selection(json_args)?;
                let outcome = self.complete(username.as_deref(), password.as_deref());
                to_json(command, &outcome)
            }
            CALLER_INFO => to_json(command, &self.caller_info()),
            other => Err(AutofillError::UnsupportedCommand(other.to_string())),
        }
    }
}

fn to_json<T: serde::Serialize>(context: &str, value: &T) -> AutofillResult<Value> {
    serde_json::to_value(value).map_err(|source| AutofillError::Json {
        context: context.to_string(),
        source,
    })
}
