use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateProductDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Minor currency units
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    pub category_id: Uuid,
    pub subcategory: Option<String>,

    /// "new" or "pre-owned"
    #[validate(length(min = 1, message = "Condition is required"))]
    pub condition: String,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    pub published: Option<bool>,
    pub images: Option<Vec<String>>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProductDto {
    pub name: Option<String>,
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i64>,

    pub category_id: Option<Uuid>,
    pub subcategory: Option<String>,
    pub condition: Option<String>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    pub published: Option<bool>,
    pub images: Option<Vec<String>>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct AdjustStockDto {
    /// Units to remove from stock (a purchase)
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct PublishProductDto {
    pub published: bool,
}

/// Flat optional filter surface shared by the listing endpoints.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProductQueryDto {
    /// Category id or display-name slug
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub condition: Option<String>,

    #[validate(range(min = 0))]
    pub min_price: Option<i64>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,

    pub search: Option<String>,
    pub location: Option<String>,

    // Only meaningful on the lean endpoint
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchQueryDto {
    #[validate(length(min = 1, message = "Search term is required"))]
    pub q: String,
}
