//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `profile` - Accumulated candidate profile and merge rules
//! - `session` - Chat session aggregate and stage machine
//! - `document` - Profile reconciliation and CV markup

pub mod document;
pub mod foundation;
pub mod profile;
pub mod session;
