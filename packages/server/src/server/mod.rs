// HTTP server setup (Axum + SSE)
pub mod app;
pub mod error;
pub mod extract;
pub mod routes;

pub use app::*;
pub use error::ApiError;
pub use extract::JsonBody;
