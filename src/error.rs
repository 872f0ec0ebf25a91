use crate::catalog::CatalogError;
use crate::response::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Error reading folder")]
    DirectoryRead,

    #[error("File not found")]
    NotFound,

    #[error("Not Found")]
    AssetNotFound,

    #[error("Invalid file name")]
    InvalidName,

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::DirectoryRead => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(self.to_string())),
            )
                .into_response(),
            AppError::NotFound | AppError::AssetNotFound => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            AppError::InvalidName => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DirectoryRead(source) => {
                tracing::error!(error = %source, "Failed to read files directory");
                AppError::DirectoryRead
            }
            CatalogError::NotFound(name) => {
                tracing::debug!(file = %name, "Requested file does not exist");
                AppError::NotFound
            }
            CatalogError::UnsafeName(name) => {
                tracing::warn!(file = %name, "Rejected file name outside the files directory");
                AppError::InvalidName
            }
            CatalogError::Io(source) => AppError::InternalServerError(source.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::AssetNotFound,
            _ => AppError::InternalServerError(err.to_string()),
        }
    }
}
