use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pizzeria_core::DomainError;
use pizzeria_infra::{EngineError, RecipeLookupError, StoreError};

use super::services::BlockingError;

pub fn engine_error_to_response(err: EngineError) -> Response {
    match err {
        EngineError::Store(StoreError::NotFound(id)) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("ingredient {id} not found"),
        ),
        EngineError::Store(StoreError::Backend(msg)) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
        EngineError::Recipe(RecipeLookupError::NotFound(id)) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("recipe {id} not found"),
        ),
        EngineError::Recipe(RecipeLookupError::Transport(msg)) => {
            json_error(StatusCode::BAD_GATEWAY, "recipe_service_error", msg)
        }
        EngineError::Recipe(RecipeLookupError::Decode(msg)) => {
            json_error(StatusCode::BAD_GATEWAY, "recipe_decode_error", msg)
        }
        EngineError::Domain(e) => domain_error_to_response(e),
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::InvalidSize(_) => json_error(StatusCode::BAD_REQUEST, "invalid_size", message),
        DomainError::InvalidCustomizationKind(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_customization_kind", message)
        }
        DomainError::Overflow(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "arithmetic_overflow", message)
        }
    }
}

pub fn blocking_error_to_response(err: BlockingError) -> Response {
    match err {
        BlockingError::Engine(e) => {
            if e.is_not_found() {
                tracing::debug!(error = %e, "request target not found");
            } else {
                tracing::warn!(error = %e, "request failed");
            }
            engine_error_to_response(e)
        }
        BlockingError::Join(e) => {
            tracing::error!(error = %e, "blocking task failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
