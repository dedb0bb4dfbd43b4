//! Note routes.
//!
//! - GET /notes?page={offset} - One page of notes starting at `offset`
//! - GET /notes/{id} - A single note
//! - POST /notes - Create a note from `{ "title", "content" }`
//!
//! Each handler does its parsing up front and hands exactly one repository
//! call to the request's `CancellationGuard`.

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
};

use notes_store::StoreError;
use notes_store::notes_core::{Note, NoteId, NoteRequest};

use crate::cancel::Cancellation;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Name of the paging query parameter.
const PAGE_PARAM: &str = "page";

/// GET /notes?page={offset} - List one page of notes.
///
/// `page` is the number of notes to skip, not a page index. It must appear
/// exactly once and be a non-negative integer.
///
/// # Response
///
/// - 200 OK: JSON array of notes (empty past the end)
/// - 400 Bad Request: `page` missing, repeated, or not a number
async fn list_notes(
    State(state): State<AppState>,
    Cancellation(signal): Cancellation,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Vec<Note>>> {
    let offset = parse_page(query.as_deref())?;

    let notes = state
        .guard()
        .run(&signal, state.notes().list_page(u64::from(offset)))
        .await??;

    tracing::info!(offset, count = notes.len(), "Listed notes");

    Ok(Json(notes))
}

/// GET /notes/{id} - Fetch one note.
///
/// # Response
///
/// - 200 OK: the note
/// - 400 Bad Request: `id` is not a canonical note identifier
/// - 404 Not Found: no note has this identifier
async fn get_note(
    State(state): State<AppState>,
    Cancellation(signal): Cancellation,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Note>> {
    let id = NoteId::from_external(&raw_id)
        .map_err(|e| ApiError::BadRequest(format!("invalid note id {:?}: {}", raw_id, e)))?;

    let note = state
        .guard()
        .run(&signal, state.notes().get_by_id(id))
        .await?
        .map_err(|e| match e {
            StoreError::NoteNotFound(id) => ApiError::NotFound(format!("note {}", id)),
            other => ApiError::Store(other),
        })?;

    tracing::info!(note_id = %note.id, "Fetched note");

    Ok(Json(note))
}

/// POST /notes - Create a note.
///
/// # Request
///
/// Body: `{ "title": "...", "content": "..." }`. Any `id` field is ignored.
///
/// # Response
///
/// - 201 Created: the new note's identifier as a JSON string
/// - 500 Internal Server Error: body could not be read or decoded (including
///   a missing `title`/`content`), or the insert failed
async fn create_note(
    State(state): State<AppState>,
    Cancellation(signal): Cancellation,
    body: Body,
) -> ApiResult<(StatusCode, Json<NoteId>)> {
    let bytes = axum::body::to_bytes(body, state.config().max_body_bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to read request body: {}", e)))?;

    let request: NoteRequest = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Internal(format!("failed to decode note: {}", e)))?;

    let id = state
        .guard()
        .run(&signal, state.notes().insert(&request.title, &request.content))
        .await??;

    tracing::info!(note_id = %id, "Note created");

    Ok((StatusCode::CREATED, Json(id)))
}

/// Extract the offset from a raw query string.
fn parse_page(query: Option<&str>) -> ApiResult<u32> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or_default())
        .map_err(|e| ApiError::BadRequest(format!("invalid query string: {}", e)))?;

    let mut pages = pairs
        .into_iter()
        .filter(|(name, _)| name == PAGE_PARAM)
        .map(|(_, value)| value);

    let (Some(page), None) = (pages.next(), pages.next()) else {
        return Err(ApiError::BadRequest(
            "must specify a single page number".to_string(),
        ));
    };

    page.parse::<u32>()
        .map_err(|e| ApiError::BadRequest(format!("invalid page number {:?}: {}", page, e)))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note))
}
