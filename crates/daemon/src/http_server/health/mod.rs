use axum::routing::get;
use axum::Router;

mod readiness;
mod version;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/livez", get(readiness::liveness_handler))
        .route("/readyz", get(readiness::readiness_handler))
        .route("/version", get(version::handler))
        .with_state(state)
}
