//! Route definitions for the contacts HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with all routes and per-route middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(contact_routes(state.clone()))
        .merge(user_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/avatars", ServeDir::new(state.avatar_dir()))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}

/// Signup, login, token refresh, and email confirmation
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh_token", get(handlers::auth::refresh_token))
        .route(
            "/auth/confirmed_email/{token}",
            get(handlers::auth::confirmed_email),
        )
        .route("/auth/request_email", post(handlers::auth::request_email))
}

/// Contact CRUD and birthdays, rate limited per client
fn contact_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/contacts",
            get(handlers::contact::list_contacts).post(handlers::contact::create_contact),
        )
        .route(
            "/contacts/birthdays",
            get(handlers::contact::upcoming_birthdays),
        )
        .route(
            "/contacts/{id}",
            get(handlers::contact::get_contact)
                .put(handlers::contact::update_contact)
                .patch(handlers::contact::update_contact)
                .delete(handlers::contact::delete_contact),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::rate_limit::rate_limit,
        ))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users/avatar", patch(handlers::user::update_avatar))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
