// db/propertydb.rs
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::propertymodel::Property;

const PROPERTY_COLUMNS: &str = r#"
    id, title, description, price, address, city, state, country,
    images, slots, category_id, subcategory,
    created_by, created_at, updated_at
"#;

#[derive(Debug, Default, Clone)]
pub struct PropertyListFilter {
    pub category_id: Option<Uuid>,
    pub subcategory: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
    pub location: Option<String>,
}

pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub images: JsonValue,
    pub category_id: Uuid,
    pub subcategory: Option<String>,
}

#[async_trait]
pub trait PropertyExt {
    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn save_property(
        &self,
        created_by: Uuid,
        data: NewProperty,
    ) -> Result<Property, sqlx::Error>;

    async fn update_property(
        &self,
        property_id: Uuid,
        data: NewProperty,
    ) -> Result<Property, sqlx::Error>;

    async fn delete_property(&self, property_id: Uuid) -> Result<(), sqlx::Error>;

    async fn list_properties(
        &self,
        filter: &PropertyListFilter,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn update_property_slots(
        &self,
        property_id: Uuid,
        slots: JsonValue,
    ) -> Result<Property, sqlx::Error>;

    async fn count_properties_in_category(&self, category_id: Uuid)
        -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_property(
        &self,
        created_by: Uuid,
        data: NewProperty,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            r#"
            INSERT INTO properties (
                title, description, price, address, city, state, country,
                images, category_id, subcategory, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.price)
        .bind(data.address)
        .bind(data.city)
        .bind(data.state)
        .bind(data.country)
        .bind(data.images)
        .bind(data.category_id)
        .bind(data.subcategory)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_property(
        &self,
        property_id: Uuid,
        data: NewProperty,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            r#"
            UPDATE properties
            SET title = $2, description = $3, price = $4,
                address = $5, city = $6, state = $7, country = $8,
                images = $9, category_id = $10, subcategory = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        ))
        .bind(property_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.price)
        .bind(data.address)
        .bind(data.city)
        .bind(data.state)
        .bind(data.country)
        .bind(data.images)
        .bind(data.category_id)
        .bind(data.subcategory)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_properties(
        &self,
        filter: &PropertyListFilter,
    ) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            r#"
            SELECT {}
            FROM properties
            WHERE ($1::uuid IS NULL OR category_id = $1)
            AND ($2::text IS NULL OR LOWER(subcategory) = LOWER($2))
            AND ($3::bigint IS NULL OR price >= $3)
            AND ($4::bigint IS NULL OR price <= $4)
            AND ($5::text IS NULL OR title ILIKE $5 OR description ILIKE $5)
            AND ($6::text IS NULL OR address ILIKE $6 OR city ILIKE $6
                 OR state ILIKE $6 OR country ILIKE $6)
            ORDER BY created_at DESC
            "#,
            PROPERTY_COLUMNS
        ))
        .bind(filter.category_id)
        .bind(filter.subcategory.as_deref())
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(filter.search.as_ref().map(|s| format!("%{}%", s)))
        .bind(filter.location.as_ref().map(|s| format!("%{}%", s)))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_property_slots(
        &self,
        property_id: Uuid,
        slots: JsonValue,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            r#"
            UPDATE properties
            SET slots = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        ))
        .bind(property_id)
        .bind(slots)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_properties_in_category(
        &self,
        category_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM properties WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
