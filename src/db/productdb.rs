// db/productdb.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::productmodel::{Product, ProductCondition};

const PRODUCT_COLUMNS: &str = r#"
    id, name, slug, description, price, category_id, subcategory, condition,
    stock, published, images, address, city, state, country,
    created_by, created_at, updated_at
"#;

/// Resolved filter set for the listing endpoints. Category/subcategory slug
/// resolution happens in the catalog service before this is built.
#[derive(Debug, Default, Clone)]
pub struct ProductListFilter {
    pub category_id: Option<Uuid>,
    pub subcategory: Option<String>,
    pub condition: Option<ProductCondition>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub include_unpublished: bool,
}

/// Reduced projection for the listing page: everything but the first image
/// is dropped.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ProductListItem {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub condition: ProductCondition,
    pub image: Option<String>,
    pub category_id: Uuid,
}

pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: i64,
    pub category_id: Uuid,
    pub subcategory: Option<String>,
    pub condition: ProductCondition,
    pub stock: i32,
    pub published: bool,
    pub images: JsonValue,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[async_trait]
pub trait ProductExt {
    async fn get_product(&self, product_id: Uuid) -> Result<Option<Product>, sqlx::Error>;

    async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, sqlx::Error>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, sqlx::Error>;

    async fn save_product(
        &self,
        created_by: Uuid,
        data: NewProduct,
    ) -> Result<Product, sqlx::Error>;

    async fn update_product(
        &self,
        product_id: Uuid,
        data: NewProduct,
    ) -> Result<Product, sqlx::Error>;

    async fn delete_product(&self, product_id: Uuid) -> Result<(), sqlx::Error>;

    async fn list_products(&self, filter: &ProductListFilter)
        -> Result<Vec<Product>, sqlx::Error>;

    async fn list_products_lean(
        &self,
        filter: &ProductListFilter,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ProductListItem>, sqlx::Error>;

    /// Candidate rows for relevance scoring: published products with a
    /// substring hit on any scored field.
    async fn search_candidates(&self, term: &str) -> Result<Vec<Product>, sqlx::Error>;

    /// Atomic conditional decrement. Returns None when the product is
    /// missing or stock is insufficient; a row that lands at zero stock is
    /// unpublished in the same statement.
    async fn adjust_stock(
        &self,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<Option<Product>, sqlx::Error>;

    async fn set_published(
        &self,
        product_id: Uuid,
        published: bool,
    ) -> Result<Product, sqlx::Error>;

    async fn count_products_in_category(&self, category_id: Uuid) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl ProductExt for DBClient {
    async fn get_product(&self, product_id: Uuid) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE slug = $1",
            PRODUCT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn save_product(
        &self,
        created_by: Uuid,
        data: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (
                name, slug, description, price, category_id, subcategory,
                condition, stock, published, images,
                address, city, state, country, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(data.name)
        .bind(data.slug)
        .bind(data.description)
        .bind(data.price)
        .bind(data.category_id)
        .bind(data.subcategory)
        .bind(data.condition)
        .bind(data.stock)
        .bind(data.published)
        .bind(data.images)
        .bind(data.address)
        .bind(data.city)
        .bind(data.state)
        .bind(data.country)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        data: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $2, slug = $3, description = $4, price = $5,
                category_id = $6, subcategory = $7, condition = $8,
                stock = $9, published = $10, images = $11,
                address = $12, city = $13, state = $14, country = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .bind(data.name)
        .bind(data.slug)
        .bind(data.description)
        .bind(data.price)
        .bind(data.category_id)
        .bind(data.subcategory)
        .bind(data.condition)
        .bind(data.stock)
        .bind(data.published)
        .bind(data.images)
        .bind(data.address)
        .bind(data.city)
        .bind(data.state)
        .bind(data.country)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_products(
        &self,
        filter: &ProductListFilter,
    ) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {}
            FROM products
            WHERE ($1::uuid IS NULL OR category_id = $1)
            AND ($2::text IS NULL OR LOWER(subcategory) = LOWER($2))
            AND ($3::text IS NULL OR condition = $3::product_condition)
            AND ($4::bigint IS NULL OR price >= $4)
            AND ($5::bigint IS NULL OR price <= $5)
            AND ($6::text IS NULL OR name ILIKE $6 OR description ILIKE $6)
            AND ($7::text IS NULL OR address ILIKE $7 OR city ILIKE $7
                 OR state ILIKE $7 OR country ILIKE $7)
            AND ($8::bool OR published = TRUE)
            ORDER BY created_at DESC
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(filter.category_id)
        .bind(filter.subcategory.as_deref())
        .bind(filter.condition.map(|c| c.to_str().to_string()))
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(filter.search.as_ref().map(|s| format!("%{}%", s)))
        .bind(filter.location.as_ref().map(|s| format!("%{}%", s)))
        .bind(filter.include_unpublished)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_products_lean(
        &self,
        filter: &ProductListFilter,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ProductListItem>, sqlx::Error> {
        let offset = (page.saturating_sub(1)) as i64 * limit as i64;

        sqlx::query_as::<_, ProductListItem>(
            r#"
            SELECT id, name, slug, price, condition, images->>0 AS image, category_id
            FROM products
            WHERE ($1::uuid IS NULL OR category_id = $1)
            AND ($2::text IS NULL OR LOWER(subcategory) = LOWER($2))
            AND ($3::text IS NULL OR condition = $3::product_condition)
            AND ($4::bigint IS NULL OR price >= $4)
            AND ($5::bigint IS NULL OR price <= $5)
            AND ($6::text IS NULL OR name ILIKE $6 OR description ILIKE $6)
            AND ($7::text IS NULL OR address ILIKE $7 OR city ILIKE $7
                 OR state ILIKE $7 OR country ILIKE $7)
            AND published = TRUE
            ORDER BY created_at DESC
            LIMIT $8 OFFSET $9
            "#,
        )
        .bind(filter.category_id)
        .bind(filter.subcategory.as_deref())
        .bind(filter.condition.map(|c| c.to_str().to_string()))
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(filter.search.as_ref().map(|s| format!("%{}%", s)))
        .bind(filter.location.as_ref().map(|s| format!("%{}%", s)))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn search_candidates(&self, term: &str) -> Result<Vec<Product>, sqlx::Error> {
        let pattern = format!("%{}%", term);

        sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {}
            FROM products
            WHERE published = TRUE
            AND (name ILIKE $1 OR description ILIKE $1 OR subcategory ILIKE $1)
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
    }

    async fn adjust_stock(
        &self,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET stock = stock - $2,
                published = CASE WHEN stock - $2 <= 0 THEN FALSE ELSE published END,
                updated_at = NOW()
            WHERE id = $1 AND stock >= $2
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_published(
        &self,
        product_id: Uuid,
        published: bool,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET published = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .bind(published)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_products_in_category(&self, category_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn filter_queries_compile() {
        let pool = PgPool::connect_lazy("postgres://localhost/casamart").unwrap();
        let db = DBClient::new(pool);

        let filter = ProductListFilter {
            search: Some("chair".to_string()),
            min_price: Some(10_000),
            ..Default::default()
        };

        let _ = db.list_products(&filter);
        let _ = db.list_products_lean(&filter, 1, 20);
    }
}
