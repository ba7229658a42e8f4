//! Research domain - streams deep research runs to clients
//!
//! Architecture:
//!   HTTP handler → validate request → action drives the research and report
//!   collaborators (kernel traits) → events written to SSE or a JSON body

pub mod actions;
pub mod events;
pub mod models;

pub use actions::*;
pub use events::StreamEvent;
pub use models::*;
