use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// On-disk value definitions for one table (`<table>.vdef.json`).
///
/// `column_order` drives generation: later columns may reference
/// values generated for earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValueDefDoc {
    /// Column names in generation order.
    pub column_order: Vec<String>,
    /// Per-column definitions keyed by column name.
    pub columns: BTreeMap<String, ColumnDefDoc>,
}

/// Raw per-column definition as authored in the document.
///
/// `type` is the wire type tag (`S`, `N`, or `L`); `format` selects a
/// generator strategy and `range` carries its parameters. `item`
/// describes list elements and `linked` sources the value from a
/// sibling dataset as `"table:key"`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDefDoc {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Box<ColumnDefDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked: Option<String>,
}
