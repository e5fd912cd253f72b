//! titanic-prep: Passenger Data Preparation Library
//!
//! Loads the Titanic train/test files, imputes missing values, encodes
//! categorical fields, splits the cleaned tables, and renders descriptive
//! charts of the training data.

pub mod charts;
pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
