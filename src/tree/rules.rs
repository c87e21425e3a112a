use crate::tree::node::ViewNode;

// ============================================================================
// Term lists
// ============================================================================

pub const HINT_EMAIL_ADDRESS: &str = "emailAddress";
pub const HINT_PASSWORD: &str = "password";
pub const HINT_USERNAME: &str = "username";

/// Autofill hints this classifier understands.
pub const SUPPORTED_HINTS: [&str; 3] = [HINT_EMAIL_ADDRESS, HINT_PASSWORD, HINT_USERNAME];

pub const PASSWORD_TERMS: [&str; 2] = ["password", "pswd"];
pub const USERNAME_TERMS: [&str; 3] = ["email", "phone", "username"];

/// Generic labels that disqualify a field from the weaker password rules.
pub const DENIED_TERMS: [&str; 4] = ["search", "find", "recipient", "edit"];

// ============================================================================
// Ordered rules
// ============================================================================

/// Password rules, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    DeclaredHint,
    LabelTerm,
    ObscuredInput,
    MarkupType,
}

pub const PASSWORD_RULES: [PasswordRule; 4] = [
    PasswordRule::DeclaredHint,
    PasswordRule::LabelTerm,
    PasswordRule::ObscuredInput,
    PasswordRule::MarkupType,
];

/// Username rules, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameRule {
    DeclaredHint,
    EmailInput,
    IdOrLabelTerm,
    MarkupType,
}

pub const USERNAME_RULES: [UsernameRule; 4] = [
    UsernameRule::DeclaredHint,
    UsernameRule::EmailInput,
    UsernameRule::IdOrLabelTerm,
    UsernameRule::MarkupType,
];

impl UsernameRule {
    pub fn matches(self, node: &ViewNode, supported_hint: Option<&str>) -> bool {
        match self {
            UsernameRule::DeclaredHint => {
                matches!(supported_hint, Some(HINT_USERNAME) | Some(HINT_EMAIL_ADDRESS))
            }
            UsernameRule::EmailInput => node.input_type.is_email(),
            UsernameRule::IdOrLabelTerm => {
                contains_any(node.id_entry.as_deref(), &USERNAME_TERMS)
                    || contains_any(node.hint.as_deref(), &USERNAME_TERMS)
            }
            UsernameRule::MarkupType => node
                .html_info
                .as_ref()
                .map(|html| html.is_input_of_type("email"))
                .unwrap_or(false),
        }
    }
}

impl PasswordRule {
    pub fn matches(self, node: &ViewNode, supported_hint: Option<&str>) -> bool {
        match self {
            PasswordRule::DeclaredHint => supported_hint == Some(HINT_PASSWORD),
            PasswordRule::LabelTerm => {
                contains_any(node.hint.as_deref(), &PASSWORD_TERMS)
                    && !is_denied(node)
                    && matched_username_rule(node, supported_hint).is_none()
            }
            PasswordRule::ObscuredInput => {
                node.input_type.is_password()
                    && !is_denied(node)
                    && matched_username_rule(node, supported_hint).is_none()
            }
            PasswordRule::MarkupType => node
                .html_info
                .as_ref()
                .map(|html| html.is_input_of_type("password"))
                .unwrap_or(false),
        }
    }
}

/// First password rule the node satisfies, if any.
pub fn matched_password_rule(node: &ViewNode, supported_hint: Option<&str>) -> Option<PasswordRule> {
    PASSWORD_RULES
        .iter()
        .copied()
        .find(|rule| rule.matches(node, supported_hint))
}

/// First username rule the node satisfies, if any.
pub fn matched_username_rule(node: &ViewNode, supported_hint: Option<&str>) -> Option<UsernameRule> {
    USERNAME_RULES
        .iter()
        .copied()
        .find(|rule| rule.matches(node, supported_hint))
}

/// The first of the node's hints this classifier supports.
pub fn supported_hint(node: &ViewNode) -> Option<&str> {
    node.autofill_hints
        .iter()
        .map(String::as_str)
        .find(|hint| SUPPORTED_HINTS.contains(hint))
}

fn is_denied(node: &ViewNode) -> bool {
    contains_any(node.id_entry.as_deref(), &DENIED_TERMS)
        || contains_any(node.hint.as_deref(), &DENIED_TERMS)
}

/// Case-insensitive substring match against any of `terms`.
pub fn contains_any(text: Option<&str>, terms: &[&str]) -> bool {
    match text {
        Some(text) => {
            let lower = text.to_lowercase();
            terms.iter().any(|t| lower.contains(t))
        }
        None => false,
    }
}
