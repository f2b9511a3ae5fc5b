//! Core contracts for rowsmith.
//!
//! This crate defines the value-definition document format, the
//! resolved table schema it compiles into, and the generated-value
//! type shared by the generation engine and the CLI.

pub mod error;
pub mod schema;
pub mod value;
pub mod vdef;

pub use error::{Error, Result};
pub use schema::{
    Column, ColumnSpec, DateRef, LinkRef, NumberLiteral, TableSchema, TypeTag, ValueKind,
};
pub use value::Value;
pub use vdef::{ColumnDefDoc, ValueDefDoc};

/// File suffix for value definition documents (`<table>.vdef.json`).
pub const VDEF_SUFFIX: &str = "vdef.json";
