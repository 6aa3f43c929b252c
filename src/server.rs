use std::io::Write;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::model::ParseReport;
use crate::parser;

pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
enum UploadError {
    #[error("No file part")]
    MissingFilePart,
    #[error("No selected file")]
    EmptyFilename,
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Error processing file: {0}")]
    Processing(String),
}

impl UploadError {
    fn status(&self) -> StatusCode {
        match self {
            UploadError::MissingFilePart
            | UploadError::EmptyFilename
            | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "upload rejected");
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router()).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

/// Accept one log file in the multipart field `file`, run the engine, and
/// return the report. The temp file is removed on every exit path by the
/// `NamedTempFile` drop.
async fn upload(mut multipart: Multipart) -> Result<Json<ParseReport>, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        if field.file_name().unwrap_or("").is_empty() {
            return Err(UploadError::EmptyFilename);
        }
        let bytes = field.bytes().await?;

        let report = tokio::task::spawn_blocking(move || {
            let mut tmp = tempfile::NamedTempFile::new().map_err(|e| e.to_string())?;
            tmp.write_all(&bytes).map_err(|e| e.to_string())?;
            parser::parse_file(tmp.path()).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| UploadError::Processing(e.to_string()))?
        .map_err(UploadError::Processing)?;

        return Ok(Json(report));
    }

    Err(UploadError::MissingFilePart)
}
