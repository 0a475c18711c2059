//! Application layer - use-case handlers.
//!
//! Handlers orchestrate domain operations and coordinate between ports.

pub mod handlers;
