//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! All handlers share one immutable `ApiContext`; per-request storage
//! connections are opened inside the handlers.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Multipart cap for label uploads (10 MiB). Label photos are small;
/// anything larger is not a label photo.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the full route table.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route(
            "/",
            get(endpoints::consult::form_page).post(endpoints::consult::submit),
        )
        .route("/records", get(endpoints::records::list))
        .route("/delete/:id", post(endpoints::records::delete_one))
        .route("/delete_all", post(endpoints::records::delete_all))
        .route(
            "/upload_medicine",
            get(endpoints::medicine::upload_page).post(endpoints::medicine::upload),
        )
        .route("/health", get(endpoints::health::check))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(ctx)
}
