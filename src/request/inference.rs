use crate::field::field_model::{ClassifiedField, PageParseResult};

/// Promote the unlabelled box right before a password field to username.
///
/// Applies only when the page has a password and no username. One pass,
/// no cascading promotions.
pub fn infer_missing_username(fields: &[ClassifiedField]) -> Vec<ClassifiedField> {
    let has_password = fields.iter().any(ClassifiedField::is_password);
    let has_username = fields.iter().any(ClassifiedField::is_username);

    if !has_password || has_username {
        return fields.to_vec();
    }

    fields
        .iter()
        .enumerate()
        .map(|(index, field)| match field {
            ClassifiedField::Unclassified(data)
                if fields.get(index + 1).is_some_and(ClassifiedField::is_password) =>
            {
                ClassifiedField::LoginUsername(data.clone())
            }
            other => other.clone(),
        })
        .collect()
}

/// Page-level inference: promoted handles leave the ignorable set.
pub fn infer_page(page: PageParseResult) -> PageParseResult {
    let fields = infer_missing_username(&page.fields);

    let mut ignorable_ids = page.ignorable_ids;
    for (before, after) in page.fields.iter().zip(&fields) {
        if !before.is_login() && after.is_login() {
            ignorable_ids.remove(&after.field_id());
        }
    }

    PageParseResult {
        fields,
        ignorable_ids,
        ..page
    }
}
