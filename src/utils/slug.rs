/// URL-safe identifier derived from a display name: lowercase, non-word
/// characters stripped, whitespace runs collapsed to single hyphens.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                ' '
            } else {
                '\u{0}'
            }
        })
        .filter(|c| *c != '\u{0}')
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// The nth slug candidate for a base: `base`, `base-1`, `base-2`, …
/// The caller owns the existence check and walks n upward until free.
pub fn nth_candidate(base: &str, n: u32) -> String {
    if n == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Real Estate"), "real-estate");
        assert_eq!(slugify("  Mixed   CASE  name "), "mixed-case-name");
    }

    #[test]
    fn slugify_strips_non_word_characters() {
        assert_eq!(slugify("Tom's \"Deluxe\" Chair!"), "toms-deluxe-chair");
        assert_eq!(slugify("50% off (today)"), "50-off-today");
    }

    #[test]
    fn slugify_is_idempotent() {
        let once = slugify("Garden Furniture & Decor");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn candidates_are_distinct() {
        assert_eq!(nth_candidate("chair", 0), "chair");
        assert_eq!(nth_candidate("chair", 1), "chair-1");
        assert_eq!(nth_candidate("chair", 2), "chair-2");
    }
}
