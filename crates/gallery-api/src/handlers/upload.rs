//! Upload flow handlers
//!
//! Every action redirects back to the draft page (post/redirect/get), except a
//! successful submit, which discards the draft and redirects to the gallery.
//! Provider calls run outside the draft lock so the page can show the in-flight state.
//! They run on their own task together with the write-back, so a client that goes away
//! mid-call cannot leave the draft busy.

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use gallery_core::{AppError, PhotoFile};
use serde::Deserialize;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{log_error, HttpAppError};
use crate::state::AppState;
use crate::views::{FileRejection, FileSource};

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    #[serde(default)]
    pub source: Option<String>,
}

impl FileQuery {
    fn source(&self) -> FileSource {
        match self.source.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("drop") => FileSource::Drop,
            _ => FileSource::Picker,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DescriptionForm {
    #[serde(default)]
    pub description: String,
}

fn draft_path(id: &Uuid) -> String {
    format!("/upload/{}", id)
}

fn back_to_draft(id: &Uuid) -> Response {
    Redirect::to(&draft_path(id)).into_response()
}

fn new_draft() -> Response {
    Redirect::to("/upload").into_response()
}

/// Start a fresh draft
pub async fn start_upload(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let id = state.drafts.create().await;
    tracing::debug!(draft_id = %id, "Upload draft created");
    Redirect::to(&draft_path(&id))
}

pub async fn upload_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.drafts.get(&id).await {
        Some(view) => Html(view.render(&draft_path(&id), state.is_local_mode())).into_response(),
        None => new_draft(),
    }
}

/// Read the single `file` field; `None` when the form was sent without choosing a file.
async fn extract_photo_file(mut multipart: Multipart) -> Result<Option<PhotoFile>, AppError> {
    let mut file: Option<PhotoFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if file.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().map(str::to_string).unwrap_or_default();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        if filename.is_empty() && data.is_empty() {
            continue;
        }
        file = Some(PhotoFile::new(filename, content_type, data));
    }

    Ok(file)
}

/// File chosen through the picker or dropped on the drop zone
#[tracing::instrument(skip(state, multipart), fields(draft_id = %id, source = ?query.source))]
pub async fn select_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<FileQuery>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    if state.drafts.get(&id).await.is_none() {
        return Ok(new_draft());
    }

    let Some(file) = extract_photo_file(multipart).await? else {
        return Ok(back_to_draft(&id));
    };

    let source = query.source();
    let validator = state.validator;
    let outcome = state
        .drafts
        .update(&id, |view| view.select_file(file, source, &validator))
        .await;

    match outcome {
        Some(Ok(())) => tracing::debug!("File selected"),
        Some(Err(FileRejection::Invalid(e))) => tracing::debug!(error = %e, "File rejected"),
        Some(Err(FileRejection::Busy)) => {
            tracing::debug!("File ignored while a provider call is in flight")
        }
        None => return Ok(new_draft()),
    }

    Ok(back_to_draft(&id))
}

/// "Change image"
pub async fn change_image(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    match state.drafts.update(&id, |view| view.change_image()).await {
        Some(()) => back_to_draft(&id),
        None => new_draft(),
    }
}

/// Save the typed description, then ask the provider for one
#[tracing::instrument(skip(state, form), fields(draft_id = %id, mode = %state.mode))]
pub async fn generate_description(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Form(form): Form<DescriptionForm>,
) -> Response {
    let started = state
        .drafts
        .update(&id, |view| {
            view.set_description(&form.description);
            view.begin_generation()
        })
        .await;

    let file = match started {
        None => return new_draft(),
        Some(Err(refusal)) => {
            tracing::debug!(?refusal, "Description generation refused");
            return back_to_draft(&id);
        }
        Some(Ok(file)) => file,
    };

    let task_state = Arc::clone(&state);
    let task = tokio::spawn(
        async move {
            let result = match task_state.photos.file_to_base64(&file) {
                Ok(image_base64) => task_state
                    .photos
                    .generate_description(&image_base64)
                    .await
                    .map(|generated| generated.description),
                Err(e) => Err(e),
            };
            if let Err(ref e) = result {
                log_error(e);
            }

            // The draft may have been discarded meanwhile; nothing to update then.
            task_state
                .drafts
                .update(&id, |view| view.finish_generation(result))
                .await;
        }
        .in_current_span(),
    );

    if let Err(e) = task.await {
        let error = task_failure(e, "Description task failed");
        state
            .drafts
            .update(&id, |view| view.finish_generation(Err(error)))
            .await;
    }

    back_to_draft(&id)
}

/// Upload the draft; on success the draft is discarded and the gallery shown
#[tracing::instrument(skip(state, form), fields(draft_id = %id, mode = %state.mode))]
pub async fn submit_upload(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Form(form): Form<DescriptionForm>,
) -> Response {
    let started = state
        .drafts
        .update(&id, |view| {
            view.set_description(&form.description);
            view.begin_submit()
        })
        .await;

    let request = match started {
        None => return new_draft(),
        Some(Err(refusal)) => {
            tracing::debug!(?refusal, "Submit refused");
            return back_to_draft(&id);
        }
        Some(Ok(request)) => request,
    };

    let task_state = Arc::clone(&state);
    let task = tokio::spawn(
        async move {
            match task_state.photos.upload_photo(request).await {
                Ok(photo) => {
                    task_state.drafts.remove(&id).await;
                    tracing::info!(photo_id = %photo.id, filename = %photo.filename, "Photo uploaded");
                    true
                }
                Err(e) => {
                    log_error(&e);
                    task_state.drafts.update(&id, |view| view.fail_submit(&e)).await;
                    false
                }
            }
        }
        .in_current_span(),
    );

    match task.await {
        Ok(true) => Redirect::to("/").into_response(),
        Ok(false) => back_to_draft(&id),
        Err(e) => {
            let error = task_failure(e, "Upload task failed");
            state.drafts.update(&id, |view| view.fail_submit(&error)).await;
            back_to_draft(&id)
        }
    }
}

/// A provider task that panicked or was aborted
fn task_failure(error: JoinError, context: &'static str) -> AppError {
    let error = AppError::from(anyhow::Error::new(error).context(context));
    log_error(&error);
    error
}
