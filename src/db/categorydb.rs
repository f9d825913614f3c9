// db/categorydb.rs
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::categorymodel::Category;

const CATEGORY_COLUMNS: &str = r#"
    id, name, description, image_url, subcategories, created_at, updated_at
"#;

#[async_trait]
pub trait CategoryExt {
    async fn get_category(&self, category_id: Uuid) -> Result<Option<Category>, sqlx::Error>;

    async fn get_categories(&self) -> Result<Vec<Category>, sqlx::Error>;

    async fn save_category(
        &self,
        name: String,
        description: Option<String>,
        image_url: Option<String>,
        subcategories: JsonValue,
    ) -> Result<Category, sqlx::Error>;

    async fn update_category(
        &self,
        category_id: Uuid,
        name: String,
        description: Option<String>,
        image_url: Option<String>,
    ) -> Result<Category, sqlx::Error>;

    async fn update_subcategories(
        &self,
        category_id: Uuid,
        subcategories: JsonValue,
    ) -> Result<Category, sqlx::Error>;

    async fn delete_category(&self, category_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl CategoryExt for DBClient {
    async fn get_category(&self, category_id: Uuid) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name ASC",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn save_category(
        &self,
        name: String,
        description: Option<String>,
        image_url: Option<String>,
        subcategories: JsonValue,
    ) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, description, image_url, subcategories)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(subcategories)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        name: String,
        description: Option<String>,
        image_url: Option<String>,
    ) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = $2, description = $3, image_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_subcategories(
        &self,
        category_id: Uuid,
        subcategories: JsonValue,
    ) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET subcategories = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(category_id)
        .bind(subcategories)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
