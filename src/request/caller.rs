use url::Url;

use crate::field::field_model::PageParseResult;
use crate::tree::classifier::non_blank;
use crate::tree::node::StructureSnapshot;

/// Scheme used to express a native app as a caller URI.
pub const APP_SCHEME: &str = "androidapp";

pub fn app_uri(package: &str) -> String {
    format!("{APP_SCHEME}://{package}")
}

/// First page-supplied package, else the first window title's `pkg/` prefix.
pub fn resolve_package(pages: &[PageParseResult], snapshot: &StructureSnapshot) -> Option<String> {
    pages
        .iter()
        .find_map(|page| page.owner_package.clone())
        .or_else(|| package_from_title(snapshot))
}

fn package_from_title(snapshot: &StructureSnapshot) -> Option<String> {
    let title = non_blank(snapshot.windows.first()?.title.as_deref())?;
    non_blank(title.split('/').next())
}

/// Website URI wins over the synthesized app URI.
pub fn resolve_uri(pages: &[PageParseResult], package: Option<&str>) -> Option<String> {
    pages
        .iter()
        .find_map(|page| page.website_uri.clone())
        .or_else(|| package.map(app_uri))
}

pub fn resolve_web_domain(pages: &[PageParseResult]) -> Option<String> {
    pages.iter().find_map(|page| page.web_domain.clone())
}

/// Term used to look up stored entries for a caller.
///
/// The URL host when `uri` parses, the raw string otherwise, empty with no caller.
pub fn caller_search_term(uri: Option<&str>) -> String {
    match uri {
        Some(uri) => match Url::parse(uri) {
            Ok(parsed) => parsed.host_str().map(str::to_string).unwrap_or_default(),
            Err(_) => uri.to_string(),
        },
        None => String::new(),
    }
}
