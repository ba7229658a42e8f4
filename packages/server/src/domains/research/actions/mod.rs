//! Research domain actions - entry-point business logic
//!
//! Called directly from the HTTP handlers with an already validated request.

pub mod aggregator;
pub mod feedback;
pub mod run_research;
pub mod stream_research;

pub use aggregator::EventAggregator;
pub use feedback::generate_feedback;
pub use run_research::run_research;
pub use stream_research::stream_research;
