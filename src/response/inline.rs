use crate::request::request_model::{FillableRequest, InlinePresentationSpec};
use crate::response::response_model::InlinePresentation;

/// Ceiling on inline suggestions, whatever the keyboard allows.
pub const MAX_INLINE_SUGGESTIONS: u32 = 5;

pub const INLINE_UI_VERSION_1: &str = "androidx.autofill.inline.ui.version:v1";

/// Inline slots we may use: one is left for the platform's own entry.
pub fn inline_suggestion_cap(max_inline_suggestions: u32) -> u32 {
    max_inline_suggestions
        .saturating_sub(1)
        .min(MAX_INLINE_SUGGESTIONS)
}

pub fn supports_inline_v1(spec: &InlinePresentationSpec) -> bool {
    spec.style_versions.iter().any(|v| v == INLINE_UI_VERSION_1)
}

/// Inline chip for the offer, rendered against the last advertised spec.
pub fn inline_presentation(
    request: &FillableRequest,
    title: &str,
    subtitle: &str,
) -> Option<InlinePresentation> {
    if inline_suggestion_cap(request.max_inline_suggestions) == 0 {
        return None;
    }

    let spec = request.inline_specs.last()?;
    if !supports_inline_v1(spec) {
        return None;
    }

    Some(InlinePresentation {
        spec: spec.clone(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        content_description: format!("{title} {subtitle}"),
        pinned: false,
    })
}
