/// Classic dynamic-programming Levenshtein distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution_cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + substitution_cost)
                .min(curr[j] + 1)
                .min(prev[j + 1] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Distance normalized into [0, 1]: 1.0 means identical, 0.0 means nothing
/// in common at the longer string's length.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein(a, b) as f64 / max_len as f64)
}

/// Best option at or above `threshold` similarity against `candidate`,
/// compared case-insensitively. Ties keep the earlier option.
pub fn closest_match<'a>(
    candidate: &str,
    options: &'a [String],
    threshold: f64,
) -> Option<&'a str> {
    let candidate = candidate.to_lowercase();
    let mut best: Option<(&str, f64)> = None;

    for option in options {
        let score = similarity(&candidate, &option.to_lowercase());
        if score >= threshold && best.map_or(true, |(_, s)| score > s) {
            best = Some((option.as_str(), score));
        }
    }

    best.map(|(option, _)| option)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
    }

    #[test]
    fn similarity_is_normalized() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abcd", "abcd"), 1.0);
        assert!(similarity("abcd", "wxyz") < 0.1);
    }

    #[test]
    fn closest_match_tolerates_typos() {
        let options = vec!["Apartments".to_string(), "Duplexes".to_string()];
        assert_eq!(closest_match("apartmnets", &options, 0.75), Some("Apartments"));
        assert_eq!(closest_match("warehouse", &options, 0.75), None);
    }

    #[test]
    fn closest_match_prefers_higher_score() {
        let options = vec!["chair".to_string(), "chairs".to_string()];
        assert_eq!(closest_match("chair", &options, 0.75), Some("chair"));
    }
}
