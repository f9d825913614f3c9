use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreatePropertyDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Minor currency units
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    // Location, all required for properties
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,

    pub images: Option<Vec<String>>,

    pub category_id: Uuid,
    pub subcategory: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdatePropertyDto {
    pub title: Option<String>,
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i64>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,

    pub images: Option<Vec<String>>,

    pub category_id: Option<Uuid>,
    pub subcategory: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSlotDto {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotDto {
    pub date: NaiveDate,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct PropertyQueryDto {
    /// Category id or display-name slug
    pub category: Option<String>,
    pub subcategory: Option<String>,

    #[validate(range(min = 0))]
    pub min_price: Option<i64>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,

    pub search: Option<String>,
    pub location: Option<String>,
}
