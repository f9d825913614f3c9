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
        propertydb::{NewProperty, PropertyListFilter},
        CategoryExt, PropertyExt,
    },
    dtos::propertydtos::{
        AddSlotDto, BookSlotDto, CreatePropertyDto, PropertyQueryDto, UpdatePropertyDto,
    },
    error::{map_sqlx_error, HttpError},
    middleware::{auth, JWTAuthMiddeware},
    models::{
        categorymodel::Category,
        propertymodel::{add_slot, book_slot, Property, SlotError},
        usermodel::UserRole,
    },
    service::catalog,
    AppState,
};

pub fn properties_handler() -> Router {
    let protected_routes = Router::new()
        .route("/", post(create_property))
        .route("/:property_id", put(update_property).delete(delete_property))
        .route("/:property_id/slots", post(add_property_slot))
        .route("/:property_id/slots/book", post(book_property_slot))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/", get(list_properties))
        .route("/:property_id", get(get_property))
        .merge(protected_routes)
}

async fn build_filter(
    app_state: &AppState,
    query: &PropertyQueryDto,
) -> Result<Option<PropertyListFilter>, HttpError> {
    let mut filter = PropertyListFilter {
        min_price: query.min_price,
        max_price: query.max_price,
        search: query.search.clone(),
        location: query.location.clone(),
        ..Default::default()
    };

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
                    None => raw_subcategory.clone(),
                }
            }
            None => catalog::normalize_name(raw_subcategory),
        });
    }

    Ok(Some(filter))
}

pub async fn list_properties(
    Query(query): Query<PropertyQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let properties = match build_filter(&app_state, &query).await? {
        Some(filter) => app_state
            .db_client
            .list_properties(&filter)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        None => Vec::new(),
    };

    Ok(Json(json!({
        "status": "success",
        "results": properties.len(),
        "data": { "properties": properties }
    })))
}

pub async fn get_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found".to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "property": property }
    })))
}

async fn resolve_subcategory(
    app_state: &AppState,
    category_id: Uuid,
    raw: Option<String>,
) -> Result<Option<String>, HttpError> {
    let category = app_state
        .db_client
        .get_category(category_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("Category does not exist".to_string()))?;

    match raw {
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
            Ok(Some(canonical))
        }
        None => Ok(None),
    }
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let subcategory =
        resolve_subcategory(&app_state, body.category_id, body.subcategory.clone()).await?;

    let property = app_state
        .db_client
        .save_property(
            auth_user.user.id,
            NewProperty {
                title: body.title,
                description: body.description,
                price: body.price,
                address: body.address,
                city: body.city,
                state: body.state,
                country: body.country,
                images: json!(body.images.unwrap_or_default()),
                category_id: body.category_id,
                subcategory,
            },
        )
        .await
        .map_err(|e| map_sqlx_error(e, "Property"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "property": property }
    })))
}

fn ensure_owner_or_admin(
    auth_user: &JWTAuthMiddeware,
    property: &Property,
) -> Result<(), HttpError> {
    if property.created_by != auth_user.user.id && auth_user.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            "You do not own this property".to_string(),
        ));
    }
    Ok(())
}

pub async fn update_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found".to_string()))?;

    ensure_owner_or_admin(&auth_user, &existing)?;

    let category_id = body.category_id.unwrap_or(existing.category_id);
    let raw_subcategory = body.subcategory.or_else(|| existing.subcategory.clone());
    let subcategory = resolve_subcategory(&app_state, category_id, raw_subcategory).await?;

    let property = app_state
        .db_client
        .update_property(
            property_id,
            NewProperty {
                title: body.title.unwrap_or_else(|| existing.title.clone()),
                description: body
                    .description
                    .unwrap_or_else(|| existing.description.clone()),
                price: body.price.unwrap_or(existing.price),
                address: body.address.unwrap_or_else(|| existing.address.clone()),
                city: body.city.unwrap_or_else(|| existing.city.clone()),
                state: body.state.unwrap_or_else(|| existing.state.clone()),
                country: body.country.unwrap_or_else(|| existing.country.clone()),
                images: body
                    .images
                    .map(|urls| json!(urls))
                    .unwrap_or_else(|| existing.images.clone()),
                category_id,
                subcategory,
            },
        )
        .await
        .map_err(|e| map_sqlx_error(e, "Property"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "property": property }
    })))
}

pub async fn delete_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let existing = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found".to_string()))?;

    ensure_owner_or_admin(&auth_user, &existing)?;

    app_state
        .db_client
        .delete_property(property_id)
        .await
        .map_err(|e| map_sqlx_error(e, "Property"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Property deleted"
    })))
}

pub async fn add_property_slot(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<AddSlotDto>,
) -> Result<impl IntoResponse, HttpError> {
    let existing = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found".to_string()))?;

    ensure_owner_or_admin(&auth_user, &existing)?;

    let slots = add_slot(existing.slot_list(), body.date).map_err(slot_error_to_http)?;

    let property = app_state
        .db_client
        .update_property_slots(property_id, json!(slots))
        .await
        .map_err(|e| map_sqlx_error(e, "Property"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "property": property }
    })))
}

pub async fn book_property_slot(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<BookSlotDto>,
) -> Result<impl IntoResponse, HttpError> {
    let existing = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found".to_string()))?;

    let slots = book_slot(existing.slot_list(), body.date).map_err(slot_error_to_http)?;

    let property = app_state
        .db_client
        .update_property_slots(property_id, json!(slots))
        .await
        .map_err(|e| map_sqlx_error(e, "Property"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "property": property }
    })))
}

fn slot_error_to_http(err: SlotError) -> HttpError {
    match err {
        SlotError::NotFound => HttpError::not_found(err.to_string()),
        SlotError::AlreadyBooked | SlotError::Duplicate => HttpError::bad_request(err.to_string()),
    }
}
