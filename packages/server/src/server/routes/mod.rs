// HTTP routes
pub mod feedback;
pub mod health;
pub mod research;

pub use feedback::*;
pub use health::*;
pub use research::*;
