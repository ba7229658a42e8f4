// Domain modules
pub mod research;
