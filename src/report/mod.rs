//! Report module - summarizing cleaning results

pub mod cleaning_report;
pub mod summary;

pub use cleaning_report::*;
pub use summary::*;
