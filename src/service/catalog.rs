// service/catalog.rs
//
// The one category/subcategory resolver shared by every catalog listing
// handler. Matching is pure over name lists; only the lookup at the edge
// touches the database.
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, CategoryExt},
    models::categorymodel::Category,
    utils::fuzzy,
};

const SUBCATEGORY_FUZZY_THRESHOLD: f64 = 0.75;

/// Collapse case, hyphens, underscores and whitespace runs so that
/// "real-estate", "Real  Estate" and "real_estate" compare equal.
pub fn normalize_name(raw: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[-_\s]+").expect("valid regex"));

    separators
        .replace_all(raw.trim(), " ")
        .to_lowercase()
        .trim()
        .to_string()
}

/// Case-insensitive, hyphen-tolerant category match over (id, name) pairs.
pub fn match_category(raw: &str, categories: &[(Uuid, String)]) -> Option<Uuid> {
    let wanted = normalize_name(raw);
    categories
        .iter()
        .find(|(_, name)| normalize_name(name) == wanted)
        .map(|(id, _)| *id)
}

/// Exact (normalized) subcategory match, returning the canonical stored
/// spelling.
pub fn match_subcategory<'a>(raw: &str, options: &'a [String]) -> Option<&'a str> {
    let wanted = normalize_name(raw);
    options
        .iter()
        .find(|option| normalize_name(option) == wanted)
        .map(|option| option.as_str())
}

/// Typo-tolerant validation used on writes: exact normalized match first,
/// then Levenshtein similarity against the known list. None means the value
/// is not acceptable for this category.
pub fn validate_subcategory<'a>(raw: &str, options: &'a [String]) -> Option<&'a str> {
    if let Some(exact) = match_subcategory(raw, options) {
        return Some(exact);
    }
    fuzzy::closest_match(raw, options, SUBCATEGORY_FUZZY_THRESHOLD)
}

#[derive(Debug)]
pub enum CategoryResolution {
    Resolved(Category),
    /// Unknown slug: listings fall back to an empty result set, not an error.
    Unresolved,
}

pub async fn resolve_category_param(
    db: &DBClient,
    raw: &str,
) -> Result<CategoryResolution, sqlx::Error> {
    if let Ok(id) = Uuid::parse_str(raw) {
        return Ok(match db.get_category(id).await? {
            Some(category) => CategoryResolution::Resolved(category),
            None => CategoryResolution::Unresolved,
        });
    }

    let categories = db.get_categories().await?;
    let pairs: Vec<(Uuid, String)> = categories.iter().map(|c| (c.id, c.name.clone())).collect();

    Ok(match match_category(raw, &pairs) {
        Some(id) => {
            let category = categories.into_iter().find(|c| c.id == id);
            match category {
                Some(category) => CategoryResolution::Resolved(category),
                None => CategoryResolution::Unresolved,
            }
        }
        None => CategoryResolution::Unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec![
            "Living Room".to_string(),
            "Home Office".to_string(),
            "Outdoor".to_string(),
        ]
    }

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_name("Real-Estate"), "real estate");
        assert_eq!(normalize_name("  real   estate "), "real estate");
        assert_eq!(normalize_name("real_estate"), "real estate");
    }

    #[test]
    fn category_matches_display_name_slug() {
        let id = Uuid::new_v4();
        let categories = vec![(id, "Real Estate".to_string())];
        assert_eq!(match_category("real-estate", &categories), Some(id));
        assert_eq!(match_category("REAL ESTATE", &categories), Some(id));
        assert_eq!(match_category("furniture", &categories), None);
    }

    #[test]
    fn subcategory_prefers_exact_normalized_match() {
        assert_eq!(
            match_subcategory("living-room", &options()),
            Some("Living Room")
        );
        assert_eq!(match_subcategory("garage", &options()), None);
    }

    #[test]
    fn validation_falls_back_to_fuzzy() {
        // One deletion away from "Outdoor": similarity 6/7
        assert_eq!(validate_subcategory("Outdor", &options()), Some("Outdoor"));
        // Nothing close enough
        assert_eq!(validate_subcategory("Basement", &options()), None);
    }

    #[test]
    fn validation_returns_canonical_spelling() {
        assert_eq!(
            validate_subcategory("HOME office", &options()),
            Some("Home Office")
        );
    }
}
