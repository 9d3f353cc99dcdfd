//! HTTP service shell for the palaver conversational proxy.
//!
//! Thin plumbing only: routing, CORS, and environment configuration around
//! the core's two operations (`handle_message`, `reset_session`).

mod config;
mod routes;

pub use config::{DEFAULT_PORT, ServeConfig};
pub use routes::{
    AppState, ChatRequest, ChatResponse, ResetRequest, ResetResponse, build_router,
};
