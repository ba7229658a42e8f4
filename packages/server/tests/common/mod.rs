// Common test utilities
#![allow(dead_code, unused_imports)]

pub mod harness;
pub mod sse;

pub use harness::*;
pub use sse::*;
