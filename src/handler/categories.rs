use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{CategoryExt, ProductExt, PropertyExt},
    dtos::categorydtos::{AddSubcategoryDto, CreateCategoryDto, UpdateCategoryDto},
    error::{map_sqlx_error, HttpError},
    middleware::{auth, role_check},
    models::usermodel::UserRole,
    service::catalog,
    AppState,
};

pub fn categories_handler() -> Router {
    let admin_routes = Router::new()
        .route("/", post(create_category))
        .route("/:category_id", axum::routing::put(update_category).delete(delete_category))
        .route("/:category_id/subcategories", post(add_subcategory))
        .route(
            "/:category_id/subcategories/:name",
            delete(remove_subcategory),
        )
        .layer(middleware::from_fn(|req, next| {
            role_check(req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/", get(get_categories))
        .route("/:category_id", get(get_category))
        .merge(admin_routes)
}

pub async fn get_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state
        .db_client
        .get_categories()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "categories": categories }
    })))
}

pub async fn get_category(
    Path(category_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let category = app_state
        .db_client
        .get_category(category_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Category not found".to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "category": category }
    })))
}

pub async fn create_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Duplicate names are rejected case-insensitively up front
    let subcategories = dedupe_subcategories(body.subcategories.unwrap_or_default())?;

    let category = app_state
        .db_client
        .save_category(
            body.name,
            body.description,
            body.image_url,
            json!(subcategories),
        )
        .await
        .map_err(|e| map_sqlx_error(e, "Category"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "category": category }
    })))
}

pub async fn update_category(
    Path(category_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let category = app_state
        .db_client
        .update_category(category_id, body.name, body.description, body.image_url)
        .await
        .map_err(|e| map_sqlx_error(e, "Category"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "category": category }
    })))
}

pub async fn delete_category(
    Path(category_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (product_count, property_count) = futures::try_join!(
        app_state.db_client.count_products_in_category(category_id),
        app_state.db_client.count_properties_in_category(category_id),
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    if product_count > 0 || property_count > 0 {
        return Err(HttpError::bad_request(
            "Category is still referenced by products or properties".to_string(),
        ));
    }

    app_state
        .db_client
        .delete_category(category_id)
        .await
        .map_err(|e| map_sqlx_error(e, "Category"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Category deleted"
    })))
}

pub async fn add_subcategory(
    Path(category_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AddSubcategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let category = app_state
        .db_client
        .get_category(category_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Category not found".to_string()))?;

    let mut names = category.subcategory_names();
    if catalog::match_subcategory(&body.name, &names).is_some() {
        return Err(HttpError::bad_request(
            "Subcategory already exists".to_string(),
        ));
    }
    names.push(body.name);

    let category = app_state
        .db_client
        .update_subcategories(category_id, json!(names))
        .await
        .map_err(|e| map_sqlx_error(e, "Category"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "category": category }
    })))
}

pub async fn remove_subcategory(
    Path((category_id, name)): Path<(Uuid, String)>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let category = app_state
        .db_client
        .get_category(category_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Category not found".to_string()))?;

    let names = category.subcategory_names();
    let canonical = catalog::match_subcategory(&name, &names)
        .map(|s| s.to_string())
        .ok_or_else(|| HttpError::not_found("Subcategory not found".to_string()))?;

    let remaining: Vec<String> = names.into_iter().filter(|n| *n != canonical).collect();

    let category = app_state
        .db_client
        .update_subcategories(category_id, json!(remaining))
        .await
        .map_err(|e| map_sqlx_error(e, "Category"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "category": category }
    })))
}

fn dedupe_subcategories(names: Vec<String>) -> Result<Vec<String>, HttpError> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        if catalog::match_subcategory(&name, &seen).is_some() {
            return Err(HttpError::bad_request(format!(
                "Duplicate subcategory: {}",
                name
            )));
        }
        seen.push(name);
    }
    Ok(seen)
}
