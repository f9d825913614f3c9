use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,

    // Ordered JSONB array of subcategory name strings
    pub subcategories: JsonValue,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn subcategory_names(&self) -> Vec<String> {
        self.subcategories
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category_with(subs: JsonValue) -> Category {
        Category {
            id: Uuid::nil(),
            name: "Real Estate".to_string(),
            description: None,
            image_url: None,
            subcategories: subs,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn subcategory_names_preserves_order() {
        let cat = category_with(json!(["Apartments", "Duplexes", "Land"]));
        assert_eq!(
            cat.subcategory_names(),
            vec!["Apartments", "Duplexes", "Land"]
        );
    }

    #[test]
    fn subcategory_names_tolerates_non_array() {
        let cat = category_with(json!(null));
        assert!(cat.subcategory_names().is_empty());
    }
}
