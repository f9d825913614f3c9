// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handler::{
        auth::auth_handler, banners::banners_handler, categories::categories_handler,
        payments::payments_handler, products::products_handler, properties::properties_handler,
        uploads::uploads_handler, users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/categories", categories_handler())
        .nest("/products", products_handler())
        .nest("/properties", properties_handler())
        .nest("/banners", banners_handler())
        .nest("/payments", payments_handler().layer(middleware::from_fn(auth)))
        .nest("/uploads", uploads_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest_service("/uploads", ServeDir::new(&app_state.env.upload_dir))
        .nest("/api", api_route)
}
