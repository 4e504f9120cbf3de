/*
 * Responsibility
 * - URL structure of the API
 * - which capability guards which route is decided by the handler's Authorized<P> argument
 */
use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use crate::api::handlers::{
    drinks::{create_drink, delete_drink, list_drinks, list_drinks_detail, update_drink},
    fallback::{method_not_allowed, not_found},
    health::health,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/drinks", get(list_drinks).post(create_drink))
        .route("/drinks-detail", get(list_drinks_detail))
        .route("/drinks/{drink_id}", patch(update_drink).delete(delete_drink))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}
