//! HTTP surface.
//!
//! Reads are public; every write goes through the [`AccessGuard`] held in
//! [`AppState`]. Lifecycle edges get their own admin-only routes instead of
//! a generic state field on PATCH.
//!
//! [`AccessGuard`]: crate::auth::AccessGuard

pub mod error;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;

pub use error::ApiError;
pub use handlers::AppState;

/// Assemble the project registry router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/projects/:project_id",
            get(handlers::get_project).patch(handlers::update_project),
        )
        .route(
            "/projects/:project_id/team",
            post(handlers::replace_team),
        )
        .route(
            "/projects/:project_id/declare-winner",
            post(handlers::declare_winner),
        )
        .route(
            "/projects/:project_id/confirm-delivery",
            post(handlers::confirm_delivery),
        )
        .route(
            "/projects/:project_id/declare-abandoned",
            post(handlers::declare_abandoned),
        )
        .with_state(state)
}
