use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        productdb::{NewProduct, ProductListFilter},
        CategoryExt, ProductExt,
    },
    dtos::productdtos::{
        AdjustStockDto, CreateProductDto, ProductQueryDto, PublishProductDto, SearchQueryDto,
        UpdateProductDto,
    },
    error::{map_sqlx_error, HttpError},
    middleware::{auth, role_check, JWTAuthMiddeware},
    models::{
        categorymodel::Category,
        productmodel::{Product, ProductCondition},
        usermodel::UserRole,
    },
    service::{catalog, relevance},
    utils::slug,
    AppState,
};

pub fn products_handler() -> Router {
    let protected_routes = Router::new()
        .route("/", post(create_product))
        .route("/:product_id", put(update_product).delete(delete_product))
        .route("/:product_id/adjust-stock", post(adjust_stock))
        .route("/:product_id/publish", put(publish_product))
        .layer(middleware::from_fn(auth));

    let admin_routes = Router::new()
        .route("/all", get(list_all_products))
        .layer(middleware::from_fn(|req, next| {
            role_check(req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/", get(list_products))
        .route("/lean", get(list_products_lean))
        .route("/search", get(search_products))
        .route("/slug/:slug", get(get_product_by_slug))
        .route("/:product_id", get(get_product))
        .merge(protected_routes)
        .merge(admin_routes)
}

/// Shared translation from the flat query surface to a database filter.
/// Returns None when the category slug resolves to nothing: the listing
/// falls back to an empty result set rather than an error.
async fn build_filter(
    app_state: &AppState,
    query: &ProductQueryDto,
) -> Result<Option<ProductListFilter>, HttpError> {
    let mut filter = ProductListFilter {
        min_price: query.min_price,
        max_price: query.max_price,
        search: query.search.clone(),
        location: query.location.clone(),
        ..Default::default()
    };

    if let Some(raw_condition) = &query.condition {
        let condition = ProductCondition::from_str(raw_condition)
            .ok_or_else(|| HttpError::bad_request("Unknown condition".to_string()))?;
        filter.condition = Some(condition);
    }

    let mut category: Option<Category> = None;
    if let Some(raw_category) = &query.category {
        match catalog::resolve_category_param(&app_state.db_client, raw_category)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
        {
            catalog::CategoryResolution::Resolved(resolved) => {
                filter.category_id = Some(resolved.id);
                category = Some(resolved);
            }
            catalog::CategoryResolution::Unresolved => return Ok(None),
        }
    }

    if let Some(raw_subcategory) = &query.subcategory {
        filter.subcategory = Some(match &category {
            Some(category) => {
                let names = category.subcategory_names();
                match catalog::match_subcategory(raw_subcategory, &names) {
                    Some(canonical) => canonical.to_string(),
                    // No known value: the equality filter will match nothing
                    None => raw_subcategory.clone(),
                }
            }
            None => catalog::normalize_name(raw_subcategory),
        });
    }

    Ok(Some(filter))
}

pub async fn list_products(
    Query(query): Query<ProductQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let products = match build_filter(&app_state, &query).await? {
        Some(filter) => app_state
            .db_client
            .list_products(&filter)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        None => Vec::new(),
    };

    Ok(Json(json!({
        "status": "success",
        "results": products.len(),
        "data": { "products": products }
    })))
}

pub async fn list_all_products(
    Query(query): Query<ProductQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let products = match build_filter(&app_state, &query).await? {
        Some(mut filter) => {
            filter.include_unpublished = true;
            app_state
                .db_client
                .list_products(&filter)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
        }
        None => Vec::new(),
    };

    Ok(Json(json!({
        "status": "success",
        "results": products.len(),
        "data": { "products": products }
    })))
}

pub async fn list_products_lean(
    Query(query): Query<ProductQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(20);

    let products = match build_filter(&app_state, &query).await? {
        Some(filter) => app_state
            .db_client
            .list_products_lean(&filter, page, limit)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        None => Vec::new(),
    };

    Ok(Json(json!({
        "status": "success",
        "results": products.len(),
        "data": {
            "products": products,
            "pagination": { "page": page, "limit": limit }
        }
    })))
}

pub async fn search_products(
    Query(query): Query<SearchQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let candidates = app_state
        .db_client
        .search_candidates(&query.q)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let ranked = relevance::rank_products(candidates, &query.q);

    Ok(Json(json!({
        "status": "success",
        "results": ranked.len(),
        "data": { "products": ranked }
    })))
}

pub async fn get_product(
    Path(product_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let product = app_state
        .db_client
        .get_product(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "product": product }
    })))
}

pub async fn get_product_by_slug(
    Path(slug): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let product = app_state
        .db_client
        .get_product_by_slug(&slug)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "product": product }
    })))
}

/// Walk the candidate sequence until a free slug is found.
async fn unique_slug(app_state: &AppState, name: &str) -> Result<String, HttpError> {
    let base = slug::slugify(name);
    if base.is_empty() {
        return Err(HttpError::bad_request("Name yields an empty slug".to_string()));
    }

    let mut n = 0;
    loop {
        let candidate = slug::nth_candidate(&base, n);
        let exists = app_state
            .db_client
            .slug_exists(&candidate)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        if !exists {
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Normalize the subcategory against the category's list, rejecting values
/// that match nothing even fuzzily.
async fn resolve_subcategory(
    app_state: &AppState,
    category_id: Uuid,
    raw: Option<String>,
) -> Result<(Category, Option<String>), HttpError> {
    let category = app_state
        .db_client
        .get_category(category_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("Category does not exist".to_string()))?;

    let subcategory = match raw {
        Some(raw) => {
            let names = category.subcategory_names();
            let canonical = catalog::validate_subcategory(&raw, &names)
                .ok_or_else(|| {
                    HttpError::bad_request(format!(
                        "Subcategory '{}' does not exist in category '{}'",
                        raw, category.name
                    ))
                })?
                .to_string();
            Some(canonical)
        }
        None => None,
    };

    Ok((category, subcategory))
}

pub async fn create_product(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateProductDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let condition = ProductCondition::from_str(&body.condition)
        .ok_or_else(|| HttpError::bad_request("Unknown condition".to_string()))?;

    let (_, subcategory) =
        resolve_subcategory(&app_state, body.category_id, body.subcategory.clone()).await?;

    let slug = unique_slug(&app_state, &body.name).await?;

    let product = app_state
        .db_client
        .save_product(
            auth_user.user.id,
            NewProduct {
                name: body.name,
                slug,
                description: body.description,
                price: body.price,
                category_id: body.category_id,
                subcategory,
                condition,
                stock: body.stock,
                published: body.published.unwrap_or(false) && body.stock > 0,
                images: json!(body.images.unwrap_or_default()),
                address: body.address,
                city: body.city,
                state: body.state,
                country: body.country,
            },
        )
        .await
        .map_err(|e| map_sqlx_error(e, "Product"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "product": product }
    })))
}

fn ensure_owner_or_admin(auth_user: &JWTAuthMiddeware, product: &Product) -> Result<(), HttpError> {
    if product.created_by != auth_user.user.id && auth_user.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            "You do not own this product".to_string(),
        ));
    }
    Ok(())
}

pub async fn update_product(
    Path(product_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateProductDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_product(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    ensure_owner_or_admin(&auth_user, &existing)?;

    let name = body.name.unwrap_or_else(|| existing.name.clone());
    // A rename regenerates the slug; an unchanged name keeps it
    let slug = if name != existing.name {
        unique_slug(&app_state, &name).await?
    } else {
        existing.slug.clone()
    };

    let condition = match body.condition {
        Some(raw) => ProductCondition::from_str(&raw)
            .ok_or_else(|| HttpError::bad_request("Unknown condition".to_string()))?,
        None => existing.condition,
    };

    let category_id = body.category_id.unwrap_or(existing.category_id);
    let raw_subcategory = body.subcategory.or_else(|| existing.subcategory.clone());
    let (_, subcategory) = resolve_subcategory(&app_state, category_id, raw_subcategory).await?;

    let stock = body.stock.unwrap_or(existing.stock);
    let published = body.published.unwrap_or(existing.published) && stock > 0;

    let product = app_state
        .db_client
        .update_product(
            product_id,
            NewProduct {
                name,
                slug,
                description: body.description.unwrap_or_else(|| existing.description.clone()),
                price: body.price.unwrap_or(existing.price),
                category_id,
                subcategory,
                condition,
                stock,
                published,
                images: body
                    .images
                    .map(|urls| json!(urls))
                    .unwrap_or_else(|| existing.images.clone()),
                address: body.address.or_else(|| existing.address.clone()),
                city: body.city.or_else(|| existing.city.clone()),
                state: body.state.or_else(|| existing.state.clone()),
                country: body.country.or_else(|| existing.country.clone()),
            },
        )
        .await
        .map_err(|e| map_sqlx_error(e, "Product"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "product": product }
    })))
}

pub async fn delete_product(
    Path(product_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let existing = app_state
        .db_client
        .get_product(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    ensure_owner_or_admin(&auth_user, &existing)?;

    app_state
        .db_client
        .delete_product(product_id)
        .await
        .map_err(|e| map_sqlx_error(e, "Product"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Product deleted"
    })))
}

pub async fn adjust_stock(
    Path(product_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AdjustStockDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Existence first so missing products are 404, not "insufficient stock"
    app_state
        .db_client
        .get_product(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    let product = app_state
        .db_client
        .adjust_stock(product_id, body.quantity)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("Insufficient stock".to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "product": product }
    })))
}

pub async fn publish_product(
    Path(product_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<PublishProductDto>,
) -> Result<impl IntoResponse, HttpError> {
    let existing = app_state
        .db_client
        .get_product(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

    ensure_owner_or_admin(&auth_user, &existing)?;

    if body.published && existing.stock <= 0 {
        return Err(HttpError::bad_request(
            "Cannot publish a product with no stock".to_string(),
        ));
    }

    let product = app_state
        .db_client
        .set_published(product_id, body.published)
        .await
        .map_err(|e| map_sqlx_error(e, "Product"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "product": product }
    })))
}
