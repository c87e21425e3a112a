use serde::{Deserialize, Serialize};

use crate::field::field_model::{FieldId, ValueKind};

// ============================================================================
// Abstract foreign view tree
// ============================================================================

/// One snapshot of a foreign screen: every window the platform exposed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureSnapshot {
    #[serde(default)]
    pub windows: Vec<WindowNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowNode {
    /// Window title, conventionally `package/ActivityName`.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub root: Option<ViewNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewNode {
    pub autofill_id: Option<FieldId>,
    pub autofill_hints: Vec<String>,
    pub autofill_options: Vec<String>,
    pub autofill_type: ValueKind,
    pub autofill_value: Option<AutofillValue>,
    pub is_focused: bool,
    pub class_name: Option<String>,
    pub input_type: InputType,
    /// Visible hint or label text.
    pub hint: Option<String>,
    /// Resource id entry name, e.g. `login_email`.
    pub id_entry: Option<String>,
    pub id_package: Option<String>,
    pub web_domain: Option<String>,
    pub web_scheme: Option<String>,
    pub html_info: Option<HtmlInfo>,
    pub children: Vec<ViewNode>,
}

/// Markup description for nodes rendered from a web page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HtmlInfo {
    pub tag: String,
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
}

impl HtmlInfo {
    pub fn is_input(&self) -> bool {
        self.tag == "input"
    }

    /// True for an `<input>` whose `type` attribute equals `input_type`.
    pub fn is_input_of_type(&self, input_type: &str) -> bool {
        self.is_input()
            && self
                .attributes
                .iter()
                .any(|(name, value)| name == "type" && value == input_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AutofillValue {
    Text(String),
    Toggle(bool),
    List(i32),
    Date(i64),
}

impl AutofillValue {
    /// Readable text of the value; blank text counts as absent.
    pub fn text(&self) -> Option<String> {
        match self {
            AutofillValue::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        }
    }
}

// ============================================================================
// Input type bit field
// ============================================================================

/// Platform input-type flags: class in the low nibble, variation above it,
/// behaviour flags in the upper bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputType(pub u32);

impl InputType {
    pub const MASK_CLASS: u32 = 0x0000_000f;
    pub const MASK_VARIATION: u32 = 0x0000_0ff0;

    pub const CLASS_TEXT: u32 = 0x1;
    pub const CLASS_NUMBER: u32 = 0x2;
    pub const CLASS_PHONE: u32 = 0x3;

    pub const TEXT_VARIATION_EMAIL_ADDRESS: u32 = 0x20;
    pub const TEXT_VARIATION_PASSWORD: u32 = 0x80;
    pub const TEXT_VARIATION_VISIBLE_PASSWORD: u32 = 0x90;
    pub const TEXT_VARIATION_WEB_EMAIL_ADDRESS: u32 = 0xd0;
    pub const TEXT_VARIATION_WEB_PASSWORD: u32 = 0xe0;
    pub const NUMBER_VARIATION_PASSWORD: u32 = 0x10;

    pub const TEXT_FLAG_MULTI_LINE: u32 = 0x0002_0000;

    pub fn class(self) -> u32 {
        self.0 & Self::MASK_CLASS
    }

    pub fn variation(self) -> u32 {
        self.0 & Self::MASK_VARIATION
    }

    pub fn is_multi_line(self) -> bool {
        self.0 & Self::TEXT_FLAG_MULTI_LINE != 0
    }

    /// Single-line, obscured password entry.
    pub fn is_password(self) -> bool {
        if self.is_multi_line() {
            return false;
        }

        match self.class() {
            Self::CLASS_TEXT => matches!(
                self.variation(),
                Self::TEXT_VARIATION_PASSWORD
                    | Self::TEXT_VARIATION_VISIBLE_PASSWORD
                    | Self::TEXT_VARIATION_WEB_PASSWORD
            ),
            Self::CLASS_NUMBER => self.variation() == Self::NUMBER_VARIATION_PASSWORD,
            _ => false,
        }
    }

    pub fn is_email(self) -> bool {
        self.class() == Self::CLASS_TEXT
            && matches!(
                self.variation(),
                Self::TEXT_VARIATION_EMAIL_ADDRESS | Self::TEXT_VARIATION_WEB_EMAIL_ADDRESS
            )
    }
}
