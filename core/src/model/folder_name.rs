use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Utc,
};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub const DEFAULT_FOLDER_DATE_FORMAT: &str = "%Y-%m";

/// Reduces an album name to characters safe in a folder name.
///
/// ```
/// use catalog_core::model::slug;
/// assert_eq!(slug(" Noël à Paris! "), "Noel_a_Paris");
/// ```
pub fn slug(name: impl AsRef<str>) -> String {
    let mut slug = String::new();
    let mut pending_separator = false;
    for c in name.as_ref().trim().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() || c == '-' {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}

pub fn is_valid_date_format(date_format: &str) -> bool {
    !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error))
}

/// `<start formatted with date_format>_<slug(name)>`, `None` if nothing of the name survives.
///
/// `date_format` must have been checked with [`is_valid_date_format`].
pub fn generate_folder_name(
    name: &str,
    start: DateTime<Utc>,
    date_format: &str,
) -> Option<String> {
    let slug = slug(name);
    if slug.is_empty() {
        return None;
    }
    Some(format!("{}_{}", start.format(date_format), slug))
}
