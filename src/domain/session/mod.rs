//! Chat session domain module.
//!
//! Handles the conversational side of CV building: the session log, the
//! accumulated profile, and the stage machine that decides which
//! information to ask for next.

mod advancer;
mod aggregate;
mod errors;
mod message;
mod stage;

pub use advancer::{
    NextPrompt, StageDecision, StepAdvancer, ASK_CONFIRMATION, ASK_FULL_NAME, ASK_SKILLS,
    ASK_WORK_HISTORY, COMPLETION_MESSAGE, FALLBACK_REPLY, GREETING, MAX_QUESTIONS,
};
pub use aggregate::ChatSession;
pub use errors::SessionError;
pub use message::{ChatMessage, MessageRole};
pub use stage::Stage;
