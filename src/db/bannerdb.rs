// db/bannerdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::bannermodel::{Banner, BannerPosition};

const BANNER_COLUMNS: &str = r#"
    id, title, subtitle, image_url, link_url, background_color, text_color,
    position, active, display_order, starts_at, ends_at, created_at, updated_at
"#;

pub struct NewBanner {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub position: BannerPosition,
    pub active: bool,
    pub display_order: i32,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[async_trait]
pub trait BannerExt {
    async fn get_banner(&self, banner_id: Uuid) -> Result<Option<Banner>, sqlx::Error>;

    /// Active banners inside their display window, in display order.
    async fn get_live_banners(
        &self,
        position: Option<BannerPosition>,
    ) -> Result<Vec<Banner>, sqlx::Error>;

    async fn get_all_banners(&self) -> Result<Vec<Banner>, sqlx::Error>;

    async fn save_banner(&self, data: NewBanner) -> Result<Banner, sqlx::Error>;

    async fn update_banner(&self, banner_id: Uuid, data: NewBanner)
        -> Result<Banner, sqlx::Error>;

    async fn delete_banner(&self, banner_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl BannerExt for DBClient {
    async fn get_banner(&self, banner_id: Uuid) -> Result<Option<Banner>, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            "SELECT {} FROM banners WHERE id = $1",
            BANNER_COLUMNS
        ))
        .bind(banner_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_live_banners(
        &self,
        position: Option<BannerPosition>,
    ) -> Result<Vec<Banner>, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            r#"
            SELECT {}
            FROM banners
            WHERE active = TRUE
            AND (starts_at IS NULL OR starts_at <= NOW())
            AND (ends_at IS NULL OR ends_at >= NOW())
            AND ($1::banner_position IS NULL OR position = $1)
            ORDER BY display_order ASC, created_at DESC
            "#,
            BANNER_COLUMNS
        ))
        .bind(position)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_banners(&self) -> Result<Vec<Banner>, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            "SELECT {} FROM banners ORDER BY display_order ASC, created_at DESC",
            BANNER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn save_banner(&self, data: NewBanner) -> Result<Banner, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            r#"
            INSERT INTO banners (
                title, subtitle, image_url, link_url, background_color,
                text_color, position, active, display_order, starts_at, ends_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            BANNER_COLUMNS
        ))
        .bind(data.title)
        .bind(data.subtitle)
        .bind(data.image_url)
        .bind(data.link_url)
        .bind(data.background_color)
        .bind(data.text_color)
        .bind(data.position)
        .bind(data.active)
        .bind(data.display_order)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_banner(
        &self,
        banner_id: Uuid,
        data: NewBanner,
    ) -> Result<Banner, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            r#"
            UPDATE banners
            SET title = $2, subtitle = $3, image_url = $4, link_url = $5,
                background_color = $6, text_color = $7, position = $8,
                active = $9, display_order = $10, starts_at = $11, ends_at = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BANNER_COLUMNS
        ))
        .bind(banner_id)
        .bind(data.title)
        .bind(data.subtitle)
        .bind(data.image_url)
        .bind(data.link_url)
        .bind(data.background_color)
        .bind(data.text_color)
        .bind(data.position)
        .bind(data.active)
        .bind(data.display_order)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_banner(&self, banner_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(banner_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
