//! AI implementations for the research library.

mod openai;
pub mod schema;

pub use openai::OpenAI;
pub use schema::ResponseSchema;
