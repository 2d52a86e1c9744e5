//! Axum route handlers. Store calls are blocking file I/O and run on
//! tokio's blocking pool.

use crate::domain::{Note, NoteError};
use crate::payload::Payload;
use crate::server::AppState;
use crate::server::response::ApiError;
use crate::shelf::NoteStore;
use axum::Form;
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;
use std::sync::Arc;

const UPLOAD_FORM: &str = include_str!("../../static/UploadForm.html");

#[derive(Debug, Deserialize)]
pub struct WriteForm {
    pub note_name: Option<String>,
    pub note: Option<String>,
}

async fn blocking<T, F>(store: &NoteStore, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&NoteStore) -> Result<T, NoteError> + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    let result = tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(result?)
}

// GET /notes/:name
pub async fn fetch_note(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let content = blocking(&state.store, move |store| store.fetch(&name)).await?;
    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], content))
}

// PUT /notes/:name
pub async fn replace_note(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let text = Payload::from_body(content_type, &body)?.into_text();

    let note = blocking(&state.store, move |store| store.replace(&name, &text)).await?;
    Ok((StatusCode::OK, format!("note '{}' updated", note.name)))
}

// DELETE /notes/:name
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let message = format!("note '{name}' deleted");
    blocking(&state.store, move |store| store.delete(&name)).await?;
    Ok((StatusCode::OK, message))
}

// GET /notes
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes: Vec<Note> = blocking(&state.store, |store| store.list()?.collect()).await?;
    Ok(Json(notes))
}

// POST /write
pub async fn write_note(
    State(state): State<Arc<AppState>>,
    form: Result<Form<WriteForm>, FormRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Form(form) = form?;
    let name = form.note_name.ok_or(ApiError::MissingField("note_name"))?;
    let content = form.note.ok_or(ApiError::MissingField("note"))?;

    let note = blocking(&state.store, move |store| store.create(&name, &content)).await?;
    Ok((StatusCode::CREATED, format!("note '{}' created", note.name)))
}

// GET /UploadForm.html
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
