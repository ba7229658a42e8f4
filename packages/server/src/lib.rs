// Deep Research Server - API Core
//
// Streams recursive web research runs to clients over server-sent events,
// with a synchronous JSON fallback.
//
// Request handling lives in domains/research; collaborator traits and the
// SSE emitter live in kernel/.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
