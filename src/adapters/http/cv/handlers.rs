//! HTTP handlers for CV endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{document_error_response, ErrorResponse};
use crate::application::handlers::document::{GenerateDocumentHandler, PreviewDocumentHandler};
use crate::domain::foundation::SessionId;

use super::dto::PreviewResponse;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CvHandlers {
    generate_handler: Arc<GenerateDocumentHandler>,
    preview_handler: Arc<PreviewDocumentHandler>,
}

impl CvHandlers {
    pub fn new(
        generate_handler: Arc<GenerateDocumentHandler>,
        preview_handler: Arc<PreviewDocumentHandler>,
    ) -> Self {
        Self {
            generate_handler,
            preview_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/cv/generate/:session_id
pub async fn generate_cv(
    State(handlers): State<CvHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return ErrorResponse::session_not_found().into_response_with(StatusCode::NOT_FOUND);
    };

    match handlers.generate_handler.handle(session_id).await {
        Ok(document) => {
            let disposition = content_disposition(&document.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.bytes,
            )
                .into_response()
        }
        Err(e) => document_error_response(e),
    }
}

/// GET /api/cv/preview/:session_id
pub async fn preview_cv(
    State(handlers): State<CvHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return ErrorResponse::session_not_found().into_response_with(StatusCode::NOT_FOUND);
    };

    match handlers.preview_handler.handle(session_id).await {
        Ok(preview) => (StatusCode::OK, Json(PreviewResponse::from(preview))).into_response(),
        Err(e) => document_error_response(e),
    }
}

/// Falls back to the bare default when the name holds bytes a header
/// cannot carry.
fn content_disposition(filename: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"CV.pdf\""))
}
