use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateBannerDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub subtitle: Option<String>,

    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image_url: String,

    pub link_url: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,

    /// "hero", "sidebar" or "footer"
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,

    pub active: Option<bool>,
    pub display_order: Option<i32>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct BannerQueryDto {
    pub position: Option<String>,
}
