//! Research pipeline.
//!
//! - [`DeepResearch`] - recursive search and learning extraction
//! - [`ReportWriter`] - final report synthesis and clarifying questions

mod report;
mod research;

pub use report::ReportWriter;
pub use research::DeepResearch;
