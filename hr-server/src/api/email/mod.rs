//! Email API Module - every route needs `email:manage`

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/Email", routes())
        .route_layer(middleware::from_fn(require_permission("email:manage")))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/campaigns",
            get(handler::list_campaigns).post(handler::create_campaign),
        )
        .route(
            "/campaigns/{id}",
            get(handler::get_campaign)
                .put(handler::update_campaign)
                .delete(handler::delete_campaign),
        )
        .route("/campaigns/{id}/schedule", post(handler::schedule_campaign))
        .route("/campaigns/{id}/send", post(handler::send_campaign))
        .route("/campaigns/{id}/cancel", post(handler::cancel_campaign))
        .route("/templates", get(handler::templates))
        .route("/send", post(handler::send_email))
}
