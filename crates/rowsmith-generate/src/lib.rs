//! Value-definition driven dataset generation for rowsmith.
//!
//! This crate consumes `<table>.vdef.json` documents to produce random
//! datasets as plain JSON, DynamoDB-style wire JSON, and CSV, with
//! `linked` columns sourced from previously generated sibling datasets.

pub mod engine;
pub mod errors;
pub mod link;
pub mod lorem;
pub mod model;
pub mod output;
pub mod store;
pub mod values;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport};
pub use store::DataPaths;
