//! Chat command and query handlers.

mod get_history;
mod send_message;
mod start_session;

pub use get_history::GetHistoryHandler;
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use start_session::{StartSessionHandler, StartSessionResult};
