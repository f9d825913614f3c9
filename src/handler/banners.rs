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
    db::{bannerdb::NewBanner, BannerExt},
    dtos::bannerdtos::{BannerQueryDto, CreateBannerDto},
    error::{map_sqlx_error, HttpError},
    middleware::{auth, role_check},
    models::{bannermodel::BannerPosition, usermodel::UserRole},
    AppState,
};

pub fn banners_handler() -> Router {
    let admin_routes = Router::new()
        .route("/all", get(list_all_banners))
        .route("/", post(create_banner))
        .route("/:banner_id", put(update_banner).delete(delete_banner))
        .layer(middleware::from_fn(|req, next| {
            role_check(req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/", get(list_banners))
        .merge(admin_routes)
}

pub async fn list_banners(
    Query(query): Query<BannerQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let position = match &query.position {
        Some(raw) => Some(
            BannerPosition::from_str(raw)
                .ok_or_else(|| HttpError::bad_request("Unknown banner position".to_string()))?,
        ),
        None => None,
    };

    let banners = app_state
        .db_client
        .get_live_banners(position)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "banners": banners }
    })))
}

pub async fn list_all_banners(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let banners = app_state
        .db_client
        .get_all_banners()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "banners": banners }
    })))
}

fn banner_from_dto(body: CreateBannerDto) -> Result<NewBanner, HttpError> {
    let position = BannerPosition::from_str(&body.position)
        .ok_or_else(|| HttpError::bad_request("Unknown banner position".to_string()))?;

    if let (Some(starts), Some(ends)) = (body.starts_at, body.ends_at) {
        if ends < starts {
            return Err(HttpError::bad_request(
                "Banner end date is before its start date".to_string(),
            ));
        }
    }

    Ok(NewBanner {
        title: body.title,
        subtitle: body.subtitle,
        image_url: body.image_url,
        link_url: body.link_url,
        background_color: body.background_color,
        text_color: body.text_color,
        position,
        active: body.active.unwrap_or(true),
        display_order: body.display_order.unwrap_or(0),
        starts_at: body.starts_at,
        ends_at: body.ends_at,
    })
}

pub async fn create_banner(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateBannerDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let banner = app_state
        .db_client
        .save_banner(banner_from_dto(body)?)
        .await
        .map_err(|e| map_sqlx_error(e, "Banner"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "banner": banner }
    })))
}

pub async fn update_banner(
    Path(banner_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateBannerDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_banner(banner_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Banner not found".to_string()))?;

    let banner = app_state
        .db_client
        .update_banner(banner_id, banner_from_dto(body)?)
        .await
        .map_err(|e| map_sqlx_error(e, "Banner"))?;

    Ok(Json(json!({
        "status": "success",
        "data": { "banner": banner }
    })))
}

pub async fn delete_banner(
    Path(banner_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_banner(banner_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Banner not found".to_string()))?;

    app_state
        .db_client
        .delete_banner(banner_id)
        .await
        .map_err(|e| map_sqlx_error(e, "Banner"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Banner deleted"
    })))
}
