use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use tracing::debug;

use chirp_core::{DeleteOutcome, MessageBoard, MessageStore};
use chirp_types::api::PatchMessageRequest;
use chirp_types::{Message, NewMessage};

use crate::{ApiError, AppState, run_blocking};

pub async fn create_message<S: MessageStore + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<NewMessage>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(req) = body?;
    let message = run_blocking(&state, move |store| MessageBoard::new(store).create(req)).await?;
    Ok(Json(message))
}

pub async fn get_all_messages<S: MessageStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = run_blocking(&state, |store| MessageBoard::new(store).list_all()).await?;
    Ok(Json(messages))
}

/// An unknown id is still a 200, with an empty body.
pub async fn get_message<S: MessageStore + 'static>(
    State(state): State<AppState<S>>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = run_blocking(&state, move |store| {
        MessageBoard::new(store).get_by_id(message_id)
    })
    .await?;

    Ok(match message {
        Some(message) => Json(message).into_response(),
        None => ().into_response(),
    })
}

/// Idempotent: 200 with `1` when a row was removed, 200 with an empty
/// body when there was nothing to remove.
pub async fn delete_message<S: MessageStore + 'static>(
    State(state): State<AppState<S>>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let outcome = run_blocking(&state, move |store| {
        MessageBoard::new(store).delete_by_id(message_id)
    })
    .await?;

    Ok(match outcome {
        DeleteOutcome::Deleted => Json(1).into_response(),
        DeleteOutcome::NoOp => {
            debug!("Delete of missing message {} ignored", message_id);
            ().into_response()
        }
    })
}

/// 200 with `1` on success. A missing id or invalid text is a 400.
pub async fn patch_message<S: MessageStore + 'static>(
    State(state): State<AppState<S>>,
    Path(message_id): Path<i64>,
    body: Result<Json<PatchMessageRequest>, JsonRejection>,
) -> Result<Json<u32>, ApiError> {
    let Json(req) = body?;
    run_blocking(&state, move |store| {
        MessageBoard::new(store).patch_by_id(message_id, &req.message_text)
    })
    .await?;

    Ok(Json(1))
}

pub async fn get_messages_by_account<S: MessageStore + 'static>(
    State(state): State<AppState<S>>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = run_blocking(&state, move |store| {
        MessageBoard::new(store).list_by_author(account_id)
    })
    .await?;

    Ok(Json(messages))
}
