use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "banner_position", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BannerPosition {
    Hero,
    Sidebar,
    Footer,
}

impl BannerPosition {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "hero" => Some(BannerPosition::Hero),
            "sidebar" => Some(BannerPosition::Sidebar),
            "footer" => Some(BannerPosition::Footer),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,

    pub position: BannerPosition,
    pub active: bool,
    pub display_order: i32,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// Active means the flag is set and `now` falls inside the optional
    /// display window.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        if let Some(starts) = self.starts_at {
            if now < starts {
                return false;
            }
        }
        if let Some(ends) = self.ends_at {
            if now > ends {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn banner(active: bool, starts: Option<i64>, ends: Option<i64>) -> Banner {
        let now = Utc::now();
        Banner {
            id: Uuid::nil(),
            title: "Mid-year sale".to_string(),
            subtitle: None,
            image_url: "https://cdn.example.com/sale.png".to_string(),
            link_url: None,
            background_color: None,
            text_color: None,
            position: BannerPosition::Hero,
            active,
            display_order: 0,
            starts_at: starts.map(|h| now + Duration::hours(h)),
            ends_at: ends.map(|h| now + Duration::hours(h)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn inactive_banner_is_never_live() {
        assert!(!banner(false, None, None).is_live(Utc::now()));
    }

    #[test]
    fn window_bounds_are_honored() {
        assert!(banner(true, Some(-1), Some(1)).is_live(Utc::now()));
        assert!(!banner(true, Some(1), None).is_live(Utc::now()));
        assert!(!banner(true, None, Some(-1)).is_live(Utc::now()));
    }
}
