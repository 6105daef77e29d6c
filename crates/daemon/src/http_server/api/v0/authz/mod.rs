use axum::routing::{get, post};
use axum::Router;

pub mod check;
pub mod scope;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/check", post(check::handler))
        .route("/scope", get(scope::handler))
        .with_state(state)
}
