//! Application handlers.
//!
//! - `chat` - session start, conversation turns, history
//! - `document` - profile assembly, rendering, generation, preview

pub mod chat;
pub mod document;
