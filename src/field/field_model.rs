use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Opaque handle of one element inside a single tree snapshot.
///
/// Handles carry no meaning across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u64);

/// Kind of value a field accepts. Only `Text` is ever filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    None,
    Text,
    Toggle,
    List,
    Date,
}

/// One inspectable input element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateField {
    pub field_id: FieldId,
    /// Labels for the field's discrete values; empty for free text.
    pub options: Vec<String>,
    pub value_kind: ValueKind,
    pub is_focused: bool,
    pub current_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "field")]
pub enum ClassifiedField {
    LoginUsername(CandidateField),
    LoginPassword(CandidateField),
    /// Never filled. Kept so the inference pass can still promote it.
    Unclassified(CandidateField),
}

impl ClassifiedField {
    pub fn data(&self) -> &CandidateField {
        match self {
            ClassifiedField::LoginUsername(data)
            | ClassifiedField::LoginPassword(data)
            | ClassifiedField::Unclassified(data) => data,
        }
    }

    pub fn field_id(&self) -> FieldId {
        self.data().field_id
    }

    pub fn is_focused(&self) -> bool {
        self.data().is_focused
    }

    pub fn is_login(&self) -> bool {
        !matches!(self, ClassifiedField::Unclassified(_))
    }

    pub fn is_username(&self) -> bool {
        matches!(self, ClassifiedField::LoginUsername(_))
    }

    pub fn is_password(&self) -> bool {
        matches!(self, ClassifiedField::LoginPassword(_))
    }
}

/// Aggregated classification of one window (or one branch of it).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageParseResult {
    pub fields: Vec<ClassifiedField>,
    pub owner_package: Option<String>,
    /// Inspected but unclassifiable handles; the platform must leave them alone.
    pub ignorable_ids: BTreeSet<FieldId>,
    pub web_domain: Option<String>,
    pub website_uri: Option<String>,
}
