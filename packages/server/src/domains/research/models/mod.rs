pub mod failure;
pub mod request;
pub mod response;

pub use failure::{FailureKind, ResearchFailure};
pub use request::{FeedbackRequest, ResearchRequest, ValidatedRequest, ValidationError};
pub use response::{FeedbackResponse, ResearchResponse};
