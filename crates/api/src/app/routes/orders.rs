use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::app::dto::{OrderRequest, PriceResponse};
use crate::app::errors;
use crate::app::services::{AppServices, run_blocking};

pub fn router() -> Router {
    Router::new()
        .route("/orders/price", post(price_order))
        .route("/orders/reverse", post(reverse_order))
}

/// Price the order and withdraw its ingredients from stock.
pub async fn price_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<OrderRequest>,
) -> Response {
    let order = match body.into_order() {
        Ok(order) => order,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match run_blocking(services, move |s| s.engine().calculate_order_price(&order)).await {
        Ok(total) => Json(PriceResponse { total }).into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}

/// Restock everything a previously priced order consumed.
pub async fn reverse_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<OrderRequest>,
) -> Response {
    let order = match body.into_order() {
        Ok(order) => order,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match run_blocking(services, move |s| s.engine().reverse_order_ingredients(&order)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::blocking_error_to_response(e),
    }
}
