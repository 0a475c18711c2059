//! In-memory repositories.
//!
//! Used when no database is configured and in tests. Data lives for the
//! lifetime of the process; clones share the same store.

mod chat_sessions;
mod profiles;
mod users;

pub use chat_sessions::InMemoryChatSessionRepository;
pub use profiles::InMemoryProfileRepository;
pub use users::InMemoryUserRepository;
