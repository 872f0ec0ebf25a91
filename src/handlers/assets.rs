//! Read-only static serving of the public directory.

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::common::mime_guess;
use crate::utils::path::{confine, resolves_within};
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::fs;
use tokio_util::io::ReaderStream;

const INDEX_FILE: &str = "index.html";

pub async fn serve_index(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    serve_from(&state, "").await
}

pub async fn serve_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    serve_from(&state, &path).await
}

async fn serve_from(state: &AppState, relative: &str) -> Result<Response, AppError> {
    let public_dir = &state.config.public_dir;
    let mut target = confine(public_dir, relative).ok_or_else(|| {
        tracing::warn!(path = %relative, "Rejected asset path outside the public directory");
        AppError::AssetNotFound
    })?;

    // Any stat failure (missing, not a directory, name too long) is a miss.
    let metadata = fs::metadata(&target)
        .await
        .map_err(|_| AppError::AssetNotFound)?;
    if metadata.is_dir() {
        target.push(INDEX_FILE);
    }

    let file = open_regular(&target).await?;
    if !resolves_within(public_dir, &target).await {
        tracing::warn!(path = %relative, "Rejected asset linked outside the public directory");
        return Err(AppError::AssetNotFound);
    }
    let size = file.metadata().await?.len();

    let headers = [
        (header::CONTENT_TYPE, mime_guess(&target).to_string()),
        (header::CONTENT_LENGTH, size.to_string()),
    ];
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((headers, body).into_response())
}

async fn open_regular(path: &std::path::Path) -> Result<fs::File, AppError> {
    let is_file = fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(AppError::AssetNotFound);
    }
    Ok(fs::File::open(path).await?)
}
