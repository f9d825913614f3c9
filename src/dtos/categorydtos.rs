use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,
    pub image_url: Option<String>,

    /// Initial ordered subcategory names
    pub subcategories: Option<Vec<String>>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct AddSubcategoryDto {
    #[validate(length(min = 1, message = "Subcategory name is required"))]
    pub name: String,
}
