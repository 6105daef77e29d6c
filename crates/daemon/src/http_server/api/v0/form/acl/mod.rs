use axum::routing::{delete as delete_method, get};
use axum::Router;

pub mod create;
pub mod delete;
pub mod list;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route("/:acl_id", delete_method(delete::handler))
        .with_state(state)
}
