//! Route handlers. Store calls do blocking file I/O and run on the blocking
//! pool.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::entity::{Note, NoteDraft};
use crate::search::NoteFilter;
use crate::share::{resolve_shared, SharedNote};
use crate::storage::NoteStore;
use crate::tags::tag_options;

use super::http_error::{HttpError, INTERNAL_ERROR, INVALID_INPUT, NOTE_NOT_FOUND};
use super::AppState;

async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, HttpError>
where
    F: FnOnce(&NoteStore) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| HttpError::new(format!("store task failed: {}", e), INTERNAL_ERROR))?
        .map_err(HttpError::from)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShareQuery {
    pub note_id: Option<String>,
}

// GET /health
pub async fn health() -> &'static str {
    "ok"
}

// GET /notes?tag=&q=
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Note>>, HttpError> {
    let filter = NoteFilter::new(query.tag.as_deref(), query.q.unwrap_or_default());
    let notes = with_store(&state, NoteStore::list).await?;
    let filtered = filter.apply(&notes).into_iter().cloned().collect();
    Ok(Json(filtered))
}

// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Json(draft) = body?;
    let note = with_store(&state, move |store| store.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, HttpError> {
    let note = with_store(&state, move |store| store.get(&id)).await?;
    Ok(Json(note))
}

// PUT /notes/{id}
pub async fn replace_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<Json<Note>, HttpError> {
    let Json(draft) = body?;
    let note = with_store(&state, move |store| store.replace(&id, draft)).await?;
    Ok(Json(note))
}

// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let lookup = id.clone();
    if with_store(&state, move |store| store.delete_by_id(&lookup)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::new(format!("Note not found: {}", id), NOTE_NOT_FOUND))
    }
}

// GET /tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<String>>, HttpError> {
    let notes = with_store(&state, NoteStore::load).await?;
    Ok(Json(tag_options(&notes)))
}

// GET /share?note_id=
pub async fn shared_note(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Result<Json<SharedNote>, HttpError> {
    let id = query
        .note_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| HttpError::new("missing note_id parameter", INVALID_INPUT))?;

    tracing::debug!(%id, "resolving shared note");
    let notes = with_store(&state, NoteStore::load).await?;
    Ok(Json(resolve_shared(&id, &notes)?))
}
