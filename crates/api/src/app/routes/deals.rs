use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use pizzeria_pricing::Deal;

use crate::app::errors;
use crate::app::services::{AppServices, run_blocking};

pub fn router() -> Router {
    Router::new()
        .route("/deals/apply", post(apply_deal))
        .route("/deals/revoke", post(revoke_deal))
}

pub async fn apply_deal(
    Extension(services): Extension<Arc<AppServices>>,
    Json(deal): Json<Deal>,
) -> Response {
    match run_blocking(services, move |s| s.engine().add_ingredient_discount(&deal)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}

pub async fn revoke_deal(
    Extension(services): Extension<Arc<AppServices>>,
    Json(deal): Json<Deal>,
) -> Response {
    match run_blocking(services, move |s| s.engine().delete_ingredient_discount(&deal)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}
