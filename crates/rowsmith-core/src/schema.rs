use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::vdef::{ColumnDefDoc, ValueDefDoc};

/// Wire-format type tag for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Number,
    List,
}

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "S",
            TypeTag::Number => "N",
            TypeTag::List => "L",
        }
    }
}

/// Cross-table key reference (`"table:key"` in the document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub table: String,
    pub key_column: String,
}

/// Reference instant for relative date generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRef {
    /// The `#now` marker: wall-clock time at generation.
    Now,
    /// A previously generated column holding a date string.
    Column(String),
}

/// Parsed constant for `value`-format numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberLiteral {
    Int(i64),
    Float(f64),
}

/// Generation strategy for one column: one variant per supported
/// (type, format) pair, carrying its parameters already parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// `(S, uuid)`: a random v4 UUID in canonical form.
    Uuid,
    /// `(S, lorem)`: a sentence whose word count lands in the range.
    Lorem { min_words: usize, max_words: usize },
    /// `(S, date)`: an instant between `reference + min_days` and
    /// `reference + max_days` (exclusive upper bound).
    Date {
        reference: DateRef,
        min_days: i64,
        max_days: i64,
    },
    /// `(S, enum)`: one of the listed choices.
    Enum { choices: Vec<String> },
    /// `(S, geohash)`: the row's `lat`/`long` encoded to `length` chars.
    Geohash { length: usize },
    /// `(S, value)`: a literal constant.
    Literal { text: String },
    /// `(N, int)`: uniform in `[min, max)`, both bounds offset by the
    /// referenced column's value when present.
    Int {
        reference: Option<String>,
        min: i64,
        max: i64,
    },
    /// `(N, float)`: uniform in `[min, max]`.
    Float { min: f64, max: f64 },
    /// `(N, value)`: a numeric constant.
    LiteralNumber(NumberLiteral),
    /// `(L, *)`: a list of distinct items generated from `item`.
    List {
        min_items: usize,
        max_items: usize,
        item: Box<ColumnSpec>,
    },
}

/// Resolved definition for one column.
///
/// `kind` is `None` only for linked columns that carry no generator
/// of their own; generating such a column with linking disabled is a
/// schema error reported at generation time.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub type_tag: TypeTag,
    pub linked: Option<LinkRef>,
    pub kind: Option<ValueKind>,
}

/// A named column in generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub spec: ColumnSpec,
}

/// Resolved schema for one table.
///
/// Built once from a [`ValueDefDoc`]; carries a name-to-position map
/// so cross-column references never scan `column_order`.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl TableSchema {
    /// Compile a raw document into a resolved schema, parsing every
    /// `range` string up front. All malformed definitions surface
    /// here as [`Error::InvalidSchema`].
    pub fn resolve(table: &str, doc: &ValueDefDoc) -> Result<Self> {
        let mut columns = Vec::with_capacity(doc.column_order.len());
        let mut index = HashMap::with_capacity(doc.column_order.len());

        for (position, name) in doc.column_order.iter().enumerate() {
            let def = doc.columns.get(name).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "column '{name}' is listed in column_order but has no definition"
                ))
            })?;
            let spec = resolve_column(name, def)?;
            if index.insert(name.clone(), position).is_some() {
                return Err(Error::InvalidSchema(format!(
                    "column '{name}' appears twice in column_order"
                )));
            }
            columns.push(Column {
                name: name.clone(),
                spec,
            });
        }

        Ok(Self {
            table: table.to_string(),
            columns,
            index,
        })
    }

    /// Position of `name` in the column order.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn resolve_column(name: &str, def: &ColumnDefDoc) -> Result<ColumnSpec> {
    let type_tag = match def.type_tag.as_str() {
        "S" => TypeTag::String,
        "N" => TypeTag::Number,
        "L" => TypeTag::List,
        other => {
            return Err(Error::InvalidSchema(format!(
                "column '{name}': unknown type '{other}' (expected S, N, or L)"
            )));
        }
    };

    let linked = match def.linked.as_deref() {
        Some(raw) => Some(parse_link(name, raw)?),
        None => None,
    };

    // Linked columns may omit the generator half of their definition;
    // they only need one when linking is disabled for the run.
    let generator_absent = match type_tag {
        TypeTag::String | TypeTag::Number => def.format.is_none(),
        TypeTag::List => def.item.is_none(),
    };
    let kind = if linked.is_some() && generator_absent {
        None
    } else {
        Some(resolve_kind(name, def, type_tag)?)
    };

    Ok(ColumnSpec {
        type_tag,
        linked,
        kind,
    })
}

fn resolve_kind(name: &str, def: &ColumnDefDoc, type_tag: TypeTag) -> Result<ValueKind> {
    match type_tag {
        TypeTag::String => resolve_string_kind(name, def),
        TypeTag::Number => resolve_number_kind(name, def),
        TypeTag::List => resolve_list_kind(name, def),
    }
}

fn resolve_string_kind(name: &str, def: &ColumnDefDoc) -> Result<ValueKind> {
    let format = def.format.as_deref().ok_or_else(|| {
        Error::InvalidSchema(format!("column '{name}': string columns require a format"))
    })?;

    match format {
        "uuid" => Ok(ValueKind::Uuid),
        "lorem" => resolve_lorem(name, def.range.as_deref()),
        "date" => resolve_date(name, require_range(name, def)?),
        "enum" => {
            let choices: Vec<String> = require_range(name, def)?
                .split(',')
                .map(str::to_string)
                .collect();
            Ok(ValueKind::Enum { choices })
        }
        "geohash" => {
            let length = require_range(name, def)?.trim().parse::<usize>().map_err(|_| {
                Error::InvalidSchema(format!("column '{name}': geohash range must be a length"))
            })?;
            if !(1..=12).contains(&length) {
                return Err(Error::InvalidSchema(format!(
                    "column '{name}': geohash length must be in 1..=12, got {length}"
                )));
            }
            Ok(ValueKind::Geohash { length })
        }
        "value" => Ok(ValueKind::Literal {
            text: require_range(name, def)?.to_string(),
        }),
        other => Err(Error::InvalidSchema(format!(
            "column '{name}': unsupported string format '{other}'"
        ))),
    }
}

fn resolve_number_kind(name: &str, def: &ColumnDefDoc) -> Result<ValueKind> {
    let format = def.format.as_deref().ok_or_else(|| {
        Error::InvalidSchema(format!("column '{name}': numeric columns require a format"))
    })?;

    match format {
        "int" => resolve_int(name, require_range(name, def)?),
        "float" => {
            let (min_raw, max_raw) = split_range(name, require_range(name, def)?)?;
            let min = parse_f64(name, min_raw)?;
            let max = parse_f64(name, max_raw)?;
            if min > max {
                return Err(Error::InvalidSchema(format!(
                    "column '{name}': float range requires min <= max, got {min}:{max}"
                )));
            }
            Ok(ValueKind::Float { min, max })
        }
        "value" => {
            let raw = require_range(name, def)?.trim();
            let literal = if let Ok(value) = raw.parse::<i64>() {
                NumberLiteral::Int(value)
            } else if let Ok(value) = raw.parse::<f64>() {
                NumberLiteral::Float(value)
            } else {
                return Err(Error::InvalidSchema(format!(
                    "column '{name}': numeric literal '{raw}' is not a number"
                )));
            };
            Ok(ValueKind::LiteralNumber(literal))
        }
        other => Err(Error::InvalidSchema(format!(
            "column '{name}': unsupported numeric format '{other}'"
        ))),
    }
}

fn resolve_list_kind(name: &str, def: &ColumnDefDoc) -> Result<ValueKind> {
    let item_def = def.item.as_deref().ok_or_else(|| {
        Error::InvalidSchema(format!("column '{name}': list columns require an item definition"))
    })?;
    let (min_raw, max_raw) = split_range(name, require_range(name, def)?)?;
    let min_items = parse_usize(name, min_raw)?;
    let max_items = parse_usize(name, max_raw)?;
    if min_items > max_items {
        return Err(Error::InvalidSchema(format!(
            "column '{name}': list range requires min <= max, got {min_items}:{max_items}"
        )));
    }
    let item = resolve_column(name, item_def)?;
    Ok(ValueKind::List {
        min_items,
        max_items,
        item: Box::new(item),
    })
}

fn resolve_lorem(name: &str, range: Option<&str>) -> Result<ValueKind> {
    let (min_words, max_words) = match range {
        None => (1, 100),
        Some(raw) => {
            let (min_raw, max_raw) = split_range(name, raw)?;
            let min = parse_usize(name, min_raw)?;
            // an empty max half means "effectively unbounded"
            let max = if max_raw.trim().is_empty() {
                1000
            } else {
                parse_usize(name, max_raw)?
            };
            (min, max)
        }
    };
    if min_words > max_words {
        return Err(Error::InvalidSchema(format!(
            "column '{name}': lorem range requires min <= max, got {min_words}:{max_words}"
        )));
    }
    Ok(ValueKind::Lorem {
        min_words,
        max_words,
    })
}

fn resolve_date(name: &str, raw: &str) -> Result<ValueKind> {
    let (reference_raw, span) = raw.split_once('+').ok_or_else(|| {
        Error::InvalidSchema(format!(
            "column '{name}': date range must be '<ref>+<min_days>:<max_days>', got '{raw}'"
        ))
    })?;
    let reference = match reference_raw.trim() {
        "#now" => DateRef::Now,
        "" => {
            return Err(Error::InvalidSchema(format!(
                "column '{name}': date range is missing a reference column"
            )));
        }
        column => DateRef::Column(column.to_string()),
    };
    let (min_raw, max_raw) = split_range(name, span)?;
    let min_days = parse_i64(name, min_raw)?;
    let max_days = parse_i64(name, max_raw)?;
    if min_days >= max_days {
        return Err(Error::InvalidSchema(format!(
            "column '{name}': date range requires min < max, got {min_days}:{max_days}"
        )));
    }
    Ok(ValueKind::Date {
        reference,
        min_days,
        max_days,
    })
}

fn resolve_int(name: &str, raw: &str) -> Result<ValueKind> {
    let (reference, span) = match raw.split_once('+') {
        Some((column, span)) => {
            let column = column.trim();
            if column.is_empty() {
                return Err(Error::InvalidSchema(format!(
                    "column '{name}': int range has an empty reference column"
                )));
            }
            (Some(column.to_string()), span)
        }
        None => (None, raw),
    };
    let (min_raw, max_raw) = split_range(name, span)?;
    let min = parse_i64(name, min_raw)?;
    let max = parse_i64(name, max_raw)?;
    if min >= max {
        return Err(Error::InvalidSchema(format!(
            "column '{name}': int range requires min < max, got {min}:{max}"
        )));
    }
    Ok(ValueKind::Int { reference, min, max })
}

fn parse_link(name: &str, raw: &str) -> Result<LinkRef> {
    match raw.split_once(':') {
        Some((table, key_column)) if !table.is_empty() && !key_column.is_empty() => Ok(LinkRef {
            table: table.to_string(),
            key_column: key_column.to_string(),
        }),
        _ => Err(Error::InvalidSchema(format!(
            "column '{name}': linked must be 'table:key', got '{raw}'"
        ))),
    }
}

fn require_range<'a>(name: &str, def: &'a ColumnDefDoc) -> Result<&'a str> {
    def.range.as_deref().ok_or_else(|| {
        Error::InvalidSchema(format!("column '{name}': this definition requires a range"))
    })
}

fn split_range<'a>(name: &str, raw: &'a str) -> Result<(&'a str, &'a str)> {
    raw.split_once(':').ok_or_else(|| {
        Error::InvalidSchema(format!(
            "column '{name}': range must be 'min:max', got '{raw}'"
        ))
    })
}

fn parse_i64(name: &str, raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        Error::InvalidSchema(format!("column '{name}': '{raw}' is not an integer"))
    })
}

fn parse_usize(name: &str, raw: &str) -> Result<usize> {
    raw.trim().parse::<usize>().map_err(|_| {
        Error::InvalidSchema(format!("column '{name}': '{raw}' is not a count"))
    })
}

fn parse_f64(name: &str, raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        Error::InvalidSchema(format!("column '{name}': '{raw}' is not a number"))
    })
}
