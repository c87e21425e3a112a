use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::field::field_model::FieldId;
use crate::request::request_model::InlinePresentationSpec;

/// Offer sent back to the platform broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillResponse {
    /// Handles the platform must not run its own heuristics on.
    pub ignored_ids: BTreeSet<FieldId>,
    pub dataset: Dataset,
}

/// One selectable row. Values are placeholders until the user authenticates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub authentication: AuthenticationToken,
    pub values: Vec<(FieldId, String)>,
    pub presentation: MenuPresentation,
    pub inline_presentation: Option<InlinePresentation>,
}

/// Capability to launch the authenticated UI for one offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationToken {
    pub action: String,
    pub request_code: i32,
    /// SHA-1 over the caller URI and the offered handles.
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPresentation {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlinePresentation {
    pub spec: InlinePresentationSpec,
    pub title: String,
    pub subtitle: String,
    pub content_description: String,
    pub pinned: bool,
}

/// Concrete values for the pending login fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillResult {
    pub values: Vec<(FieldId, String)>,
}

impl FillResult {
    pub fn value_for(&self, id: FieldId) -> Option<&str> {
        self.values
            .iter()
            .find(|(field_id, _)| *field_id == id)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What the resumed UI hands back to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionOutcome {
    Filled(FillResult),
    Cancelled,
}
