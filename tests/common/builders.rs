use autofill_protocol::field::field_model::{CandidateField, ClassifiedField, FieldId, ValueKind};
use autofill_protocol::request::request_model::{
    FillContext, FillRequest, FillableRequest, InlinePresentationSpec, InlineSuggestionsRequest,
    LoginDataset,
};
use autofill_protocol::response::inline::INLINE_UI_VERSION_1;
use autofill_protocol::tree::node::{HtmlInfo, InputType, StructureSnapshot, ViewNode, WindowNode};

pub const TEXT_PASSWORD: u32 = InputType::CLASS_TEXT | InputType::TEXT_VARIATION_PASSWORD;
pub const TEXT_EMAIL: u32 = InputType::CLASS_TEXT | InputType::TEXT_VARIATION_EMAIL_ADDRESS;

// ============================================================================
// View nodes
// ============================================================================

/// Plain single-line text box with no hints.
pub fn edit_text(id: u64) -> ViewNode {
    ViewNode {
        autofill_id: Some(FieldId(id)),
        class_name: Some("android.widget.EditText".into()),
        autofill_type: ValueKind::Text,
        input_type: InputType(InputType::CLASS_TEXT),
        ..ViewNode::default()
    }
}

pub fn password_box(id: u64) -> ViewNode {
    ViewNode {
        input_type: InputType(TEXT_PASSWORD),
        ..edit_text(id)
    }
}

pub fn email_box(id: u64) -> ViewNode {
    ViewNode {
        input_type: InputType(TEXT_EMAIL),
        ..edit_text(id)
    }
}

pub fn button(id: u64) -> ViewNode {
    ViewNode {
        autofill_id: Some(FieldId(id)),
        class_name: Some("android.widget.Button".into()),
        ..ViewNode::default()
    }
}

pub fn html_input(id: u64, input_type: &str) -> ViewNode {
    ViewNode {
        autofill_id: Some(FieldId(id)),
        autofill_type: ValueKind::Text,
        html_info: Some(HtmlInfo {
            tag: "input".into(),
            attributes: vec![("type".into(), input_type.into())],
        }),
        ..ViewNode::default()
    }
}

pub fn focused(node: ViewNode) -> ViewNode {
    ViewNode {
        is_focused: true,
        ..node
    }
}

pub fn hinted(node: ViewNode, hint: &str) -> ViewNode {
    ViewNode {
        hint: Some(hint.into()),
        ..node
    }
}

pub fn container(package: Option<&str>, children: Vec<ViewNode>) -> ViewNode {
    ViewNode {
        class_name: Some("android.widget.LinearLayout".into()),
        id_package: package.map(str::to_string),
        children,
        ..ViewNode::default()
    }
}

// ============================================================================
// Requests
// ============================================================================

pub fn snapshot(roots: Vec<ViewNode>) -> StructureSnapshot {
    StructureSnapshot {
        windows: roots
            .into_iter()
            .map(|root| WindowNode {
                title: None,
                root: Some(root),
            })
            .collect(),
    }
}

pub fn request(roots: Vec<ViewNode>) -> FillRequest {
    FillRequest {
        fill_contexts: vec![FillContext {
            structure: snapshot(roots),
        }],
        inline_request: None,
    }
}

pub fn app_request(package: &str, children: Vec<ViewNode>) -> FillRequest {
    request(vec![container(Some(package), children)])
}

pub fn v1_spec() -> InlinePresentationSpec {
    InlinePresentationSpec {
        min_size: (100, 40),
        max_size: (400, 80),
        style_versions: vec![INLINE_UI_VERSION_1.into()],
    }
}

pub fn with_inline(mut request: FillRequest, max: u32, specs: Vec<InlinePresentationSpec>) -> FillRequest {
    request.inline_request = Some(InlineSuggestionsRequest {
        max_suggestion_count: max,
        presentation_specs: specs,
    });
    request
}

/// Focused password preceded by an unlabelled box, inside `com.example.shop`.
pub fn shop_login_request() -> FillRequest {
    app_request(
        "com.example.shop",
        vec![edit_text(1), focused(password_box(2)), button(3)],
    )
}

// ============================================================================
// Parsed values
// ============================================================================

pub fn candidate(id: u64) -> CandidateField {
    CandidateField {
        field_id: FieldId(id),
        options: vec![],
        value_kind: ValueKind::Text,
        is_focused: false,
        current_text: None,
    }
}

pub fn fillable(fields: Vec<ClassifiedField>, uri: &str) -> FillableRequest {
    FillableRequest {
        dataset: LoginDataset { fields },
        ignorable_ids: Default::default(),
        owner_package: None,
        uri: Some(uri.into()),
        web_domain: None,
        max_inline_suggestions: 0,
        inline_specs: vec![],
    }
}
