use axum::routing::{get, post};
use axum::Router;

pub mod acl;
pub mod create;
pub mod delete;
pub mod entry;
pub mod get;
pub mod list;
pub mod publish;
pub mod unpublish;
pub mod update;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:form_id",
            get(get::handler)
                .patch(update::handler)
                .delete(delete::handler),
        )
        .route("/:form_id/publish", post(publish::handler))
        .route("/:form_id/unpublish", post(unpublish::handler))
        .nest("/:form_id/acl", acl::router(state.clone()))
        .nest("/:form_id/entries", entry::router(state.clone()))
        .with_state(state)
}
