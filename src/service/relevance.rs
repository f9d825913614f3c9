// service/relevance.rs
//
// Weighted-sum search scoring. The weights mirror the listing search
// behavior: exact name hits dominate, description hits only break ties.
use serde::Serialize;

use crate::models::productmodel::Product;

pub const EXACT_NAME_WEIGHT: i32 = 10;
pub const NAME_CONTAINS_WEIGHT: i32 = 5;
pub const SUBCATEGORY_CONTAINS_WEIGHT: i32 = 3;
pub const DESCRIPTION_CONTAINS_WEIGHT: i32 = 1;

#[derive(Debug, Serialize)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,
    pub score: i32,
}

pub fn score_product(product: &Product, term: &str) -> i32 {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return 0;
    }

    let name = product.name.to_lowercase();
    let description = product.description.to_lowercase();

    let mut score = 0;

    if name == term {
        score += EXACT_NAME_WEIGHT;
    }
    if name.contains(&term) {
        score += NAME_CONTAINS_WEIGHT;
    }
    if product
        .subcategory
        .as_deref()
        .map_or(false, |s| s.to_lowercase().contains(&term))
    {
        score += SUBCATEGORY_CONTAINS_WEIGHT;
    }
    if description.contains(&term) {
        score += DESCRIPTION_CONTAINS_WEIGHT;
    }

    score
}

/// Score, drop zero-score documents, sort descending. Equal scores keep the
/// incoming (recency) order.
pub fn rank_products(products: Vec<Product>, term: &str) -> Vec<ScoredProduct> {
    let mut scored: Vec<ScoredProduct> = products
        .into_iter()
        .map(|product| {
            let score = score_product(&product, term);
            ScoredProduct { product, score }
        })
        .filter(|s| s.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::productmodel::ProductCondition;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn product(name: &str, subcategory: Option<&str>, description: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: crate::utils::slug::slugify(name),
            description: description.to_string(),
            price: 150_000,
            category_id: Uuid::new_v4(),
            subcategory: subcategory.map(|s| s.to_string()),
            condition: ProductCondition::New,
            stock: 3,
            published: true,
            images: json!([]),
            address: None,
            city: None,
            state: None,
            country: None,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn exact_name_match_stacks_with_contains() {
        let p = product("Office Chair", None, "An office chair.");
        // exact (10) + contains (5) + description (1)
        assert_eq!(score_product(&p, "office chair"), 16);
    }

    #[test]
    fn weights_apply_per_field() {
        let p = product("Standing Desk", Some("Home Office"), "Great for any office.");
        // name misses, subcategory contains (3), description contains (1)
        assert_eq!(score_product(&p, "office"), 4);
    }

    #[test]
    fn zero_scores_are_dropped_and_order_is_descending() {
        let ranked = rank_products(
            vec![
                product("Garden Hose", None, "Waters the garden."),
                product("Office Chair", None, "Chair for the office."),
                product("Bookshelf", None, "Holds books."),
            ],
            "office",
        );

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].product.name, "Office Chair");
    }

    #[test]
    fn empty_term_matches_nothing() {
        let ranked = rank_products(vec![product("Office Chair", None, "A chair.")], "  ");
        assert!(ranked.is_empty());
    }
}
