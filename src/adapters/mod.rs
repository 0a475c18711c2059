//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - LLM completion providers
//! - `oracle` - rule-based and live extraction oracles
//! - `rendering` - external process rendering engine
//! - `postgres` / `memory` - repository implementations
//! - `http` - axum routers

pub mod ai;
pub mod http;
pub mod memory;
pub mod oracle;
pub mod postgres;
pub mod rendering;
