use std::sync::Arc;

use axum::{
    extract::Multipart, middleware, response::IntoResponse, routing::post, Extension, Json, Router,
};
use serde_json::json;

use crate::{config::Config, error::HttpError, middleware::auth, AppState};

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn uploads_handler() -> Router {
    Router::new()
        .route("/", post(upload_images))
        .layer(middleware::from_fn(auth))
}

pub async fn upload_images(
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut urls: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();

        if !content_type.starts_with("image/") {
            return Err(HttpError::bad_request(
                "Only image uploads are accepted".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(e.to_string()))?;

        if data.len() > MAX_IMAGE_BYTES {
            return Err(HttpError::bad_request("Image exceeds 5MB limit".to_string()));
        }

        let url = match app_state.env.upload_backend.as_str() {
            "cloud" => store_cloud(&app_state.env, &file_name, data.to_vec()).await?,
            _ => store_local(&app_state.env, &file_name, &data).await?,
        };

        urls.push(url);
    }

    if urls.is_empty() {
        return Err(HttpError::bad_request("No files provided".to_string()));
    }

    Ok(Json(json!({
        "status": "success",
        "data": { "urls": urls }
    })))
}

async fn store_local(config: &Config, file_name: &str, data: &[u8]) -> Result<String, HttpError> {
    let extension = file_name
        .rsplit('.')
        .next()
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin");

    let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
    let path = std::path::Path::new(&config.upload_dir).join(&stored_name);

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(format!("{}/uploads/{}", config.app_url, stored_name))
}

async fn store_cloud(
    config: &Config,
    file_name: &str,
    data: Vec<u8>,
) -> Result<String, HttpError> {
    if config.cloud_upload_url.is_empty() {
        return Err(HttpError::server_error(
            "Cloud upload backend is not configured".to_string(),
        ));
    }

    let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);

    let client = reqwest::Client::new();
    let response = client
        .post(&config.cloud_upload_url)
        .header(
            "Authorization",
            format!("Bearer {}", config.cloud_upload_key),
        )
        .multipart(form)
        .send()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    body["url"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| HttpError::server_error("Image host returned no URL".to_string()))
}
