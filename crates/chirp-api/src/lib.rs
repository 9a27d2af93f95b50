//! HTTP transport for the account and message services.

pub mod accounts;
pub mod error;
pub mod messages;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use chirp_core::{AccountStore, MessageStore};
use chirp_types::api::HealthResponse;

pub use error::ApiError;

pub type AppState<S> = Arc<AppStateInner<S>>;

pub struct AppStateInner<S> {
    pub store: S,
}

/// Build the full route table over `store`.
pub fn router<S>(store: S) -> Router
where
    S: AccountStore + MessageStore + 'static,
{
    let state: AppState<S> = Arc::new(AppStateInner { store });

    Router::new()
        .route("/register", post(accounts::register::<S>))
        .route("/login", post(accounts::login::<S>))
        .route(
            "/messages",
            post(messages::create_message::<S>).get(messages::get_all_messages::<S>),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message::<S>)
                .delete(messages::delete_message::<S>)
                .patch(messages::patch_message::<S>),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::get_messages_by_account::<S>),
        )
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Run a store-bound closure on the blocking pool.
pub(crate) async fn run_blocking<S, F, T>(state: &AppState<S>, f: F) -> Result<T, ApiError>
where
    S: Send + Sync + 'static,
    F: FnOnce(&S) -> chirp_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.store))
        .await
        .map_err(ApiError::Join)?
        .map_err(ApiError::from)
}
