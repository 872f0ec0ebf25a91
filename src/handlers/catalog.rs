use crate::catalog::FileEntry;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::common::content_disposition;
use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FileEntry>>, AppError> {
    let files = state.lister.list_files().await?;
    Ok(Json(files))
}

#[derive(Deserialize)]
pub struct DownloadParams {
    file: Option<String>,
}

pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, AppError> {
    let file_name = params
        .file
        .ok_or_else(|| AppError::BadRequest("Missing file parameter".to_string()))?;

    let download = state.retriever.retrieve(&file_name).await?;

    let headers = [
        (header::CONTENT_TYPE, download.mime_type.to_string()),
        (header::CONTENT_LENGTH, download.size.to_string()),
        (
            header::CONTENT_DISPOSITION,
            content_disposition(&download.file_name),
        ),
    ];
    let body = Body::from_stream(ReaderStream::new(download.file));

    Ok((headers, body).into_response())
}
