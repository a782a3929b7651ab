use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use pizzeria_core::IngredientId;
use pizzeria_inventory::NewIngredient;

use crate::app::errors;
use crate::app::services::{AppServices, run_blocking};

pub fn router() -> Router {
    Router::new()
        .route("/ingredients", get(list_ingredients).post(create_ingredient))
        .route(
            "/ingredients/:id",
            get(get_ingredient).put(update_ingredient).delete(delete_ingredient),
        )
}

fn parse_id(raw: &str) -> Result<IngredientId, Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

pub async fn list_ingredients(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match run_blocking(services, |s| s.list_ingredients()).await {
        Ok(ingredients) => Json(ingredients).into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}

pub async fn create_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewIngredient>,
) -> Response {
    if let Err(e) = body.validate() {
        return errors::domain_error_to_response(e);
    }

    match run_blocking(services, move |s| s.create_ingredient(body)).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}

pub async fn get_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match run_blocking(services, move |s| s.get_ingredient(id)).await {
        Ok(ingredient) => Json(ingredient).into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}

pub async fn update_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewIngredient>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = body.validate() {
        return errors::domain_error_to_response(e);
    }

    match run_blocking(services, move |s| s.update_ingredient(id, body)).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}

pub async fn delete_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match run_blocking(services, move |s| s.delete_ingredient(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}
