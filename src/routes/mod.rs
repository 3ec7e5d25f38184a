use axum::{
    Router,
    routing::{get, post},
};
use folio_contact::Handler;

mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub contact: Handler,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/contact", post(contact::action))
        .with_state(app_state)
}
