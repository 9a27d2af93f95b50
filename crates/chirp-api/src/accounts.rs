use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use chirp_core::{AccountDirectory, AccountStore};
use chirp_types::{Account, Credentials, NewAccount};

use crate::{ApiError, AppState, run_blocking};

/// `POST /register`: 200 with the stored account, 409 on a taken
/// username, 400 on invalid input.
pub async fn register<S: AccountStore + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<NewAccount>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = body?;
    let account = run_blocking(&state, move |store| {
        AccountDirectory::new(store).register(req)
    })
    .await?;

    Ok(Json(account))
}

/// `POST /login`: 200 with the matching account, 401 otherwise.
pub async fn login<S: AccountStore + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = body?;
    let account = run_blocking(&state, move |store| {
        AccountDirectory::new(store).verify(&req)
    })
    .await?;

    Ok(Json(account))
}
