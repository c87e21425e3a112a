use std::sync::Arc;

use crate::{
    request::parser::RequestParser,
    response::builder::OfferSettings,
    service::autofill_service::AutofillService,
    session::store::SessionStore,
    trace::logger::TraceLogger,
};

pub mod cli;
pub mod field;
pub mod request;
pub mod response;
pub mod service;
pub mod session;
pub mod trace;
pub mod tree;

/// Service with default offer settings and no trace file.
pub fn default_service(parser: RequestParser, session: Arc<dyn SessionStore>) -> AutofillService {
    AutofillService::new(parser, OfferSettings::default(), session, TraceLogger::disabled())
}
