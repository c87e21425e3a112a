use std::collections::BTreeSet;

use tracing::debug;

use crate::field::field_model::{ClassifiedField, PageParseResult};
use crate::request::blocklist::Blocklist;
use crate::request::caller::{resolve_package, resolve_uri, resolve_web_domain};
use crate::request::inference::infer_page;
use crate::request::request_model::{FillRequest, FillableRequest, LoginDataset};
use crate::tree::classifier::classify_snapshot;

/// Why a request produced no offer. None of these are faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfillableReason {
    NoStructure,
    NoFocusedField,
    BlockedCaller,
    FocusNotLogin,
}

impl UnfillableReason {
    pub fn as_str(self) -> &'static str {
        match self {
            UnfillableReason::NoStructure => "no_structure",
            UnfillableReason::NoFocusedField => "no_focused_field",
            UnfillableReason::BlockedCaller => "blocked_caller",
            UnfillableReason::FocusNotLogin => "focus_not_login",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Fillable(FillableRequest),
    Unfillable {
        reason: UnfillableReason,
        uri: Option<String>,
    },
}

impl ParseOutcome {
    pub fn into_option(self) -> Option<FillableRequest> {
        match self {
            ParseOutcome::Fillable(request) => Some(request),
            ParseOutcome::Unfillable { .. } => None,
        }
    }
}

/// Turns one fill request into a fillable login request, or nothing.
#[derive(Debug, Clone)]
pub struct RequestParser {
    blocklist: Blocklist,
    inline_enabled: bool,
}

impl RequestParser {
    pub fn new(blocklist: Blocklist) -> Self {
        Self {
            blocklist,
            inline_enabled: true,
        }
    }

    pub fn with_inline_enabled(mut self, enabled: bool) -> Self {
        self.inline_enabled = enabled;
        self
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    pub fn parse(&self, request: &FillRequest) -> Option<FillableRequest> {
        self.evaluate(request).into_option()
    }

    pub fn evaluate(&self, request: &FillRequest) -> ParseOutcome {
        let Some(context) = request.fill_contexts.last() else {
            debug!("fill request carries no structure");
            return unfillable(UnfillableReason::NoStructure, None);
        };
        let snapshot = &context.structure;

        let pages: Vec<PageParseResult> = classify_snapshot(snapshot)
            .into_iter()
            .map(infer_page)
            .collect();

        let fields: Vec<&ClassifiedField> = pages.iter().flat_map(|p| p.fields.iter()).collect();

        let Some(focused) = fields.iter().find(|f| f.is_focused()) else {
            debug!(fields = fields.len(), "no focused field");
            return unfillable(UnfillableReason::NoFocusedField, None);
        };

        let owner_package = resolve_package(&pages, snapshot);
        let uri = resolve_uri(&pages, owner_package.as_deref());

        if self.blocklist.is_blocked(uri.as_deref()) {
            debug!(uri = ?uri, "caller is blocklisted");
            return unfillable(UnfillableReason::BlockedCaller, uri);
        }

        if !focused.is_login() {
            debug!(field = focused.field_id().0, "focused field is not a login field");
            return unfillable(UnfillableReason::FocusNotLogin, uri);
        }

        let login_fields: Vec<ClassifiedField> = fields
            .iter()
            .filter(|f| f.is_login())
            .map(|f| (*f).clone())
            .collect();

        let ignorable_ids: BTreeSet<_> = pages
            .iter()
            .flat_map(|p| p.ignorable_ids.iter().copied())
            .collect();

        let (max_inline_suggestions, inline_specs) = match (&request.inline_request, self.inline_enabled) {
            (Some(inline), true) => (inline.max_suggestion_count, inline.presentation_specs.clone()),
            _ => (0, Vec::new()),
        };

        debug!(
            uri = ?uri,
            login_fields = login_fields.len(),
            ignored = ignorable_ids.len(),
            "fill request is fillable"
        );

        ParseOutcome::Fillable(FillableRequest {
            dataset: LoginDataset {
                fields: login_fields,
            },
            ignorable_ids,
            owner_package,
            uri,
            web_domain: resolve_web_domain(&pages),
            max_inline_suggestions,
            inline_specs,
        })
    }
}

fn unfillable(reason: UnfillableReason, uri: Option<String>) -> ParseOutcome {
    ParseOutcome::Unfillable { reason, uri }
}
