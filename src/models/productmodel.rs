use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "product_condition", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    PreOwned,
}

impl ProductCondition {
    pub fn to_str(&self) -> &str {
        match self {
            ProductCondition::New => "new",
            ProductCondition::PreOwned => "pre_owned",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "new" => Some(ProductCondition::New),
            "pre_owned" | "pre-owned" => Some(ProductCondition::PreOwned),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,

    // Minor currency units
    pub price: i64,

    pub category_id: Uuid,
    pub subcategory: Option<String>,
    pub condition: ProductCondition,
    pub stock: i32,
    pub published: bool,

    // JSONB array of image URLs
    pub images: JsonValue,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn first_image(&self) -> Option<String> {
        self.images
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_parses_both_spellings() {
        assert_eq!(
            ProductCondition::from_str("pre-owned"),
            Some(ProductCondition::PreOwned)
        );
        assert_eq!(
            ProductCondition::from_str("Pre_Owned"),
            Some(ProductCondition::PreOwned)
        );
        assert_eq!(ProductCondition::from_str("new"), Some(ProductCondition::New));
        assert_eq!(ProductCondition::from_str("refurbished"), None);
    }
}
