use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::field::field_model::{ClassifiedField, FieldId};
use crate::tree::node::StructureSnapshot;

// ============================================================================
// Inbound fill request
// ============================================================================

/// One platform fill request. Only the last context is inspected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillRequest {
    #[serde(default)]
    pub fill_contexts: Vec<FillContext>,
    #[serde(default)]
    pub inline_request: Option<InlineSuggestionsRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillContext {
    pub structure: StructureSnapshot,
}

/// Inline-suggestion capability advertised by the keyboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineSuggestionsRequest {
    pub max_suggestion_count: u32,
    #[serde(default)]
    pub presentation_specs: Vec<InlinePresentationSpec>,
}

/// Opaque presentation spec; only the style versions are inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlinePresentationSpec {
    #[serde(default)]
    pub min_size: (u32, u32),
    #[serde(default)]
    pub max_size: (u32, u32),
    #[serde(default)]
    pub style_versions: Vec<String>,
}

// ============================================================================
// Parsed outcome
// ============================================================================

/// Login partition: username and password fields only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginDataset {
    pub fields: Vec<ClassifiedField>,
}

/// A request worth answering with an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillableRequest {
    pub dataset: LoginDataset,
    pub ignorable_ids: BTreeSet<FieldId>,
    pub owner_package: Option<String>,
    pub uri: Option<String>,
    pub web_domain: Option<String>,
    pub max_inline_suggestions: u32,
    pub inline_specs: Vec<InlinePresentationSpec>,
}

impl FillableRequest {
    pub fn field_ids(&self) -> Vec<FieldId> {
        self.dataset.fields.iter().map(ClassifiedField::field_id).collect()
    }
}
