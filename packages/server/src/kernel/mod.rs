//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod sse;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use sse::{SseEmitter, SseFrame};
pub use test_dependencies::{MockReportWriter, MockResearcher, TestDependencies};
pub use traits::*;
