use std::sync::Arc;

use autofill_protocol::field::field_model::FieldId;
use autofill_protocol::response::builder::OfferSettings;
use autofill_protocol::response::response_model::CompletionOutcome;
use autofill_protocol::service::autofill_service::AutofillService;
use autofill_protocol::service::command::{CALLER_INFO, COMPLETE_AUTOFILL, CallerInfo, login_selection};
use autofill_protocol::service::error::AutofillError;
use autofill_protocol::session::store::FillSession;
use autofill_protocol::trace::logger::TraceLogger;
use autofill_protocol::tree::node::ViewNode;

use crate::common::builders::{
    app_request, container, email_box, focused, password_box, request, shop_login_request,
};
use crate::common::utils::{parser, resume_ui, service};

mod common;

// ============================================================================
// End-to-end protocol
// ============================================================================

#[test]
fn offer_then_authenticated_fill() {
    let (service, session) = service();

    let response = service.on_fill_request(&shop_login_request()).expect("offer expected");
    assert_eq!(response.dataset.values.len(), 2);
    assert_eq!(response.ignored_ids.iter().copied().collect::<Vec<_>>(), vec![FieldId(3)]);

    let ui = resume_ui(&service);
    let caller = service.caller_info();
    assert_eq!(caller.uri.as_deref(), Some("androidapp://com.example.shop"));
    assert_eq!(caller.search_term, "com.example.shop");

    let outcome = service.complete(Some("alice"), Some("s3cret")).unwrap();
    let CompletionOutcome::Filled(result) = &outcome else {
        panic!("expected a fill, got {outcome:?}");
    };
    assert_eq!(result.value_for(FieldId(1)), Some("alice"));
    assert_eq!(result.value_for(FieldId(2)), Some("s3cret"));

    assert_eq!(ui.delivered(), vec![outcome]);
    assert_eq!(session.get(), None);
}

#[test]
fn web_caller_search_term_is_its_domain() {
    let (service, _session) = service();
    let req = request(vec![ViewNode {
        web_domain: Some("accounts.example.com".into()),
        ..container(
            Some("com.android.chrome"),
            vec![email_box(1), focused(password_box(2))],
        )
    }]);

    service.on_fill_request(&req).unwrap();
    let caller = service.caller_info();
    assert_eq!(caller.uri.as_deref(), Some("https://accounts.example.com"));
    assert_eq!(caller.search_term, "accounts.example.com");
}

#[test]
fn caller_info_is_served_once() {
    let (service, _session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();

    assert!(service.current_caller_uri().is_some());
    assert_eq!(service.current_caller_uri(), None);
    assert_eq!(service.caller_info(), CallerInfo::default());
}

#[test]
fn empty_selection_cancels() {
    let (service, session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();
    let ui = resume_ui(&service);

    assert_eq!(service.complete(None, None), Some(CompletionOutcome::Cancelled));
    assert_eq!(ui.last(), Some(CompletionOutcome::Cancelled));
    assert_eq!(session.get(), None);
}

#[test]
fn completion_without_active_ui_keeps_the_offer() {
    let (service, session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();

    assert_eq!(service.complete(Some("alice"), Some("s3cret")), None);
    assert!(session.get().is_some());
}

#[test]
fn paused_ui_receives_nothing() {
    let (service, session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();
    let ui = resume_ui(&service);
    service.on_ui_paused();

    assert_eq!(service.complete(Some("alice"), Some("s3cret")), None);
    assert!(ui.delivered().is_empty());
    assert!(session.get().is_some());

    // Resuming again allows the retry.
    let ui = resume_ui(&service);
    assert!(service.complete(Some("alice"), Some("s3cret")).is_some());
    assert_eq!(ui.delivered().len(), 1);
}

#[test]
fn dropped_ui_is_not_kept_alive() {
    let (service, _session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();
    drop(resume_ui(&service));

    assert_eq!(service.complete(Some("alice"), None), None);
}

#[test]
fn later_offer_replaces_earlier_one() {
    let (service, _session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();
    service
        .on_fill_request(&app_request("com.example.mail", vec![focused(email_box(9))]))
        .unwrap();
    let _ui = resume_ui(&service);

    let outcome = service.complete(Some("alice"), Some("s3cret")).unwrap();
    let CompletionOutcome::Filled(result) = outcome else {
        panic!("expected a fill");
    };
    assert_eq!(result.values, vec![(FieldId(9), "alice".to_string())]);
}

#[test]
fn unfillable_request_leaves_pending_offer_alone() {
    let (service, session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();

    let blocked = app_request("com.android.settings", vec![focused(password_box(5))]);
    assert!(service.on_fill_request(&blocked).is_none());
    assert_eq!(
        session.get().unwrap().uri.as_deref(),
        Some("androidapp://com.example.shop")
    );
}

#[test]
fn completion_after_completion_is_cancelled() {
    let (service, _session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();
    let _ui = resume_ui(&service);

    assert!(matches!(service.complete(Some("a"), Some("b")), Some(CompletionOutcome::Filled(_))));
    assert_eq!(service.complete(Some("a"), Some("b")), Some(CompletionOutcome::Cancelled));
}

// ============================================================================
// JSON commands
// ============================================================================

#[test]
fn login_selection_decodes_partial_entries() {
    let (username, password) = login_selection(r#"{"type":"Login","username":"alice"}"#).unwrap();
    assert_eq!(username.as_deref(), Some("alice"));
    assert_eq!(password, None);
}

#[test]
fn card_selection_is_rejected() {
    let err = login_selection(r#"{"type":"CreditCard"}"#).unwrap_err();
    assert!(matches!(err, AutofillError::InvalidCommandArgs { .. }));
}

#[test]
fn malformed_selection_is_a_json_error() {
    let err = login_selection("{not json").unwrap_err();
    assert!(matches!(err, AutofillError::Json { .. }));
}

#[test]
fn invoke_complete_autofill() {
    let (service, _session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();
    let ui = resume_ui(&service);

    let value = service
        .invoke(
            COMPLETE_AUTOFILL,
            r#"{"type":"Login","username":"alice","password":"s3cret"}"#,
        )
        .unwrap();

    assert!(value.get("Filled").is_some(), "unexpected payload {value}");
    assert_eq!(ui.delivered().len(), 1);
}

#[test]
fn invoke_complete_without_ui_returns_null() {
    let (service, _session) = service();
    let value = service
        .invoke(COMPLETE_AUTOFILL, r#"{"type":"Login","username":"alice"}"#)
        .unwrap();
    assert!(value.is_null());
}

#[test]
fn invoke_caller_info() {
    let (service, _session) = service();
    service.on_fill_request(&shop_login_request()).unwrap();

    let value = service.invoke(CALLER_INFO, "{}").unwrap();
    assert_eq!(value["uri"], "androidapp://com.example.shop");
    assert_eq!(value["search_term"], "com.example.shop");
}

#[test]
fn invoke_unknown_command_fails() {
    let (service, _session) = service();
    let err = service.invoke("delete_everything", "{}").unwrap_err();
    assert!(matches!(err, AutofillError::UnsupportedCommand(ref name) if name == "delete_everything"));
    assert!(err.to_string().contains("delete_everything"));
}

// ============================================================================
// Protocol trace
// ============================================================================

#[test]
fn trace_records_every_stage_as_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let service = AutofillService::new(
        parser(),
        OfferSettings::default(),
        FillSession::shared(),
        TraceLogger::new(&path),
    );

    service.on_fill_request(&shop_login_request()).unwrap();
    service.on_fill_request(&app_request("com.android.settings", vec![focused(password_box(1))]));
    let ui = resume_ui(&service);
    service.caller_info();
    service.complete(Some("alice"), Some("s3cret"));
    drop(ui);

    let content = std::fs::read_to_string(&path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let stages: Vec<&str> = events.iter().map(|e| e["stage"].as_str().unwrap()).collect();

    assert_eq!(
        stages,
        vec!["parse", "offer", "parse", "lifecycle", "caller_query", "complete"]
    );
    assert_eq!(events[0]["decision"], "fillable");
    assert_eq!(events[0]["field_count"], 2);
    assert_eq!(events[2]["suppression_reason"], "blocked_caller");
    assert_eq!(events[4]["decision"], "served");
    assert_eq!(events[5]["decision"], "filled");
}

#[test]
fn disabled_trace_logger_is_silent() {
    let logger = TraceLogger::disabled();
    assert!(!logger.is_enabled());

    let service = AutofillService::new(
        parser(),
        OfferSettings::default(),
        Arc::new(FillSession::new()),
        logger,
    );
    assert!(service.on_fill_request(&shop_login_request()).is_some());
}
