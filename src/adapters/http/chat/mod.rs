//! HTTP adapter for chat endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{HistoryResponse, SendMessageRequest, SendMessageResponse, StartSessionResponse};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
