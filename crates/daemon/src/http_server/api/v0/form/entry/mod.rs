use axum::routing::get;
use axum::Router;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:entry_id",
            get(get::handler)
                .patch(update::handler)
                .delete(delete::handler),
        )
        .with_state(state)
}
