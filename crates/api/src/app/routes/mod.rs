use axum::Router;

pub mod deals;
pub mod ingredients;
pub mod orders;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .merge(ingredients::router())
        .merge(orders::router())
        .merge(deals::router())
}
