pub mod cli;
pub mod config;
pub mod email;
pub mod error;
pub mod observability;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use folio_contact::{Envelope, Handler, Mailer};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use config::Config;
pub use routes::AppState;

/// Create the application router with its middleware stack
///
/// Used by `serve` and by integration tests, which pass their own mailer.
pub fn create_app(mailer: Arc<dyn Mailer>, envelope: Envelope) -> Router {
    let state = AppState {
        contact: Handler::new(mailer, envelope),
    };

    routes::router(state)
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}
