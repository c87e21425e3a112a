use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::debug;

use crate::field::field_model::{ClassifiedField, ValueKind};
use crate::request::request_model::FillableRequest;
use crate::response::inline::inline_presentation;
use crate::response::response_model::{
    AuthenticationToken, Dataset, FillResponse, FillResult, MenuPresentation,
};
use crate::session::store::SessionStore;

/// How the offer row looks and which UI it launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSettings {
    #[serde(default = "default_auth_action")]
    pub auth_action: String,
    #[serde(default = "default_request_code")]
    pub request_code: i32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for OfferSettings {
    fn default() -> Self {
        Self {
            auth_action: default_auth_action(),
            request_code: default_request_code(),
            title: default_title(),
            subtitle: default_subtitle(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_auth_action() -> String { "com.onekeepass.action.AF_LOGIN".to_string() }
fn default_request_code() -> i32 { 1001 }
fn default_title() -> String { "OneKeePass".to_string() }
fn default_subtitle() -> String { "Login".to_string() }
fn default_placeholder() -> String { "SOME_PLACE_HOLDER".to_string() }

pub struct ResponseBuilder {
    session: Arc<dyn SessionStore>,
    settings: OfferSettings,
}

impl ResponseBuilder {
    pub fn new(session: Arc<dyn SessionStore>, settings: OfferSettings) -> Self {
        Self { session, settings }
    }

    /// Offer one authentication-gated dataset and remember the request.
    pub fn build_offer(&self, request: FillableRequest) -> FillResponse {
        let values = request
            .dataset
            .fields
            .iter()
            .map(|field| (field.field_id(), self.settings.placeholder.clone()))
            .collect();

        let dataset = Dataset {
            authentication: AuthenticationToken {
                action: self.settings.auth_action.clone(),
                request_code: self.settings.request_code,
                fingerprint: offer_fingerprint(&request),
            },
            values,
            presentation: MenuPresentation {
                label: self.settings.title.clone(),
            },
            inline_presentation: inline_presentation(
                &request,
                &self.settings.title,
                &self.settings.subtitle,
            ),
        };

        let response = FillResponse {
            ignored_ids: request.ignorable_ids.clone(),
            dataset,
        };

        debug!(uri = ?request.uri, values = response.dataset.values.len(), "offer built");
        self.session.set(request);

        response
    }
}

/// Real values for the login fields of a request taken out of the session.
///
/// `None` means cancellation: nothing selected, or nothing pending. A
/// selection that matches no field kind (a username for a password-only
/// page) is still `Some`, with no values.
pub fn build_completion(
    pending: Option<&FillableRequest>,
    username: Option<&str>,
    password: Option<&str>,
) -> Option<FillResult> {
    if username.is_none() && password.is_none() {
        return None;
    }

    let Some(pending) = pending else {
        debug!("completion requested with no pending request");
        return None;
    };

    let values = pending
        .dataset
        .fields
        .iter()
        .filter(|field| field.data().value_kind == ValueKind::Text)
        .filter_map(|field| {
            let value = match field {
                ClassifiedField::LoginUsername(_) => username,
                ClassifiedField::LoginPassword(_) => password,
                ClassifiedField::Unclassified(_) => None,
            }?;
            Some((field.field_id(), value.to_string()))
        })
        .collect();

    Some(FillResult { values })
}

/// Stable digest of the caller and the handles being offered.
pub fn offer_fingerprint(request: &FillableRequest) -> String {
    let mut hasher = Sha1::new();
    hasher.update(request.uri.as_deref().unwrap_or("").as_bytes());
    for id in request.field_ids() {
        hasher.update(b":");
        hasher.update(id.0.to_string().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
