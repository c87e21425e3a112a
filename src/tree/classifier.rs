use crate::field::field_model::{CandidateField, ClassifiedField, PageParseResult};
use crate::tree::node::{StructureSnapshot, ViewNode};
use crate::tree::rules::{matched_password_rule, matched_username_rule, supported_hint};

/// Package id the platform reports when it has nothing better.
pub const UNKNOWN_PACKAGE_SENTINEL: &str = "android";

pub const DEFAULT_WEB_SCHEME: &str = "https";

/// Widget class names (last path segment) treated as text inputs.
const TEXT_INPUT_CLASSES: [&str; 2] = ["AutoCompleteTextView", "MultiAutoCompleteTextView"];

/// Classify every window of the snapshot, one result per window with a root.
pub fn classify_snapshot(snapshot: &StructureSnapshot) -> Vec<PageParseResult> {
    snapshot
        .windows
        .iter()
        .filter_map(|window| window.root.as_ref())
        .map(classify_tree)
        .collect()
}

/// Post-order walk: every child branch is folded in before the node itself.
pub fn classify_tree(node: &ViewNode) -> PageParseResult {
    let mut result = PageParseResult {
        owner_package: valid_package(node.id_package.as_deref()),
        website_uri: website_uri(node),
        web_domain: non_blank(node.web_domain.as_deref()),
        ..PageParseResult::default()
    };

    for child in &node.children {
        let branch = classify_tree(child);

        result.fields.extend(branch.fields);
        result.ignorable_ids.extend(branch.ignorable_ids);

        if result.owner_package.is_none() {
            result.owner_package = branch.owner_package;
        }
        if result.website_uri.is_none() {
            result.website_uri = branch.website_uri;
        }
        if result.web_domain.is_none() {
            result.web_domain = branch.web_domain;
        }
    }

    match to_classified_field(node) {
        Some(field) => result.fields.push(field),
        None => {
            if let Some(id) = node.autofill_id {
                result.ignorable_ids.insert(id);
            }
        }
    }

    result
}

/// Convert one node; `None` when it has no handle or is not an input.
pub fn to_classified_field(node: &ViewNode) -> Option<ClassifiedField> {
    let field_id = node.autofill_id?;
    let hint = supported_hint(node);

    if hint.is_none() && !is_input_field(node) {
        return None;
    }

    let data = CandidateField {
        field_id,
        options: node.autofill_options.clone(),
        value_kind: node.autofill_type,
        is_focused: node.is_focused,
        current_text: node.autofill_value.as_ref().and_then(|v| v.text()),
    };

    // Password first, so a node matching both never lands as username.
    let field = if matched_password_rule(node, hint).is_some() {
        ClassifiedField::LoginPassword(data)
    } else if matched_username_rule(node, hint).is_some() {
        ClassifiedField::LoginUsername(data)
    } else {
        ClassifiedField::Unclassified(data)
    };

    Some(field)
}

pub fn is_input_field(node: &ViewNode) -> bool {
    let is_text_widget = node
        .class_name
        .as_deref()
        .map(|name| {
            let simple = name.rsplit('.').next().unwrap_or(name);
            simple.ends_with("EditText") || TEXT_INPUT_CLASSES.contains(&simple)
        })
        .unwrap_or(false);

    is_text_widget || node.html_info.as_ref().is_some_and(|html| html.is_input())
}

/// `<scheme>://<domain>` for nodes rendered from a web page.
pub fn website_uri(node: &ViewNode) -> Option<String> {
    let domain = non_blank(node.web_domain.as_deref())?;
    let scheme = non_blank(node.web_scheme.as_deref())
        .unwrap_or_else(|| DEFAULT_WEB_SCHEME.to_string());

    Some(format!("{scheme}://{domain}"))
}

fn valid_package(package: Option<&str>) -> Option<String> {
    non_blank(package).filter(|p| p != UNKNOWN_PACKAGE_SENTINEL)
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
