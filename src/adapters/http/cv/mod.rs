//! HTTP adapter for CV endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::PreviewResponse;
pub use handlers::CvHandlers;
pub use routes::cv_routes;
