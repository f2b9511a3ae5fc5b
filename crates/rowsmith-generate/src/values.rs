use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use geohash::Coord;
use rand::{Rng, RngCore};
use rand_chacha::ChaCha8Rng;

use rowsmith_core::{ColumnSpec, DateRef, Error, NumberLiteral, TableSchema, Value, ValueKind};

use crate::errors::GenerationError;
use crate::link::LinkResolver;
use crate::lorem;
use crate::store::DataPaths;

const SECONDS_PER_DAY: i64 = 86_400;

/// Per-run state threaded through every component: search paths, the
/// linking switch, the link cache, and the run RNG. Owning all of it
/// here keeps one run's lifetime explicit and test setup trivial.
pub struct GenContext<'a> {
    pub paths: &'a DataPaths,
    pub link: bool,
    pub max_list_attempts: u32,
    pub resolver: LinkResolver,
    pub rng: ChaCha8Rng,
}

/// Generate one value for the column `name`, reading earlier columns
/// of the in-progress `row` when the spec references them.
///
/// Linked columns take priority over the declared (type, format) pair
/// whenever linking is enabled for the run.
pub fn generate_value(
    name: &str,
    spec: &ColumnSpec,
    row: &[Value],
    schema: &TableSchema,
    ctx: &mut GenContext<'_>,
) -> Result<Value, GenerationError> {
    if ctx.link {
        if let Some(link) = &spec.linked {
            let key = ctx.resolver.resolve_key(link, ctx.paths, &mut ctx.rng)?;
            return Ok(Value::Text(key));
        }
    }

    let Some(kind) = &spec.kind else {
        return Err(Error::InvalidSchema(format!(
            "column '{name}' only defines a link and linking is disabled"
        ))
        .into());
    };

    match kind {
        ValueKind::Uuid => Ok(Value::Text(random_uuid(&mut ctx.rng))),
        ValueKind::Lorem {
            min_words,
            max_words,
        } => loop {
            // intentional unbounded retry; satisfiability is the
            // schema author's responsibility
            let (text, words) = lorem::sentence(&mut ctx.rng);
            if (*min_words..=*max_words).contains(&words) {
                return Ok(Value::Text(text));
            }
        },
        ValueKind::Date {
            reference,
            min_days,
            max_days,
        } => {
            let ref_seconds = match reference {
                DateRef::Now => Utc::now().timestamp(),
                DateRef::Column(column) => {
                    let value = row_value(name, column, row, schema)?;
                    let text = value.as_str().ok_or_else(|| {
                        Error::InvalidSchema(format!(
                            "column '{name}': reference column '{column}' does not hold a date string"
                        ))
                    })?;
                    parse_instant(name, text)?
                }
            };
            let min = ref_seconds + SECONDS_PER_DAY * min_days;
            let max = ref_seconds + SECONDS_PER_DAY * max_days;
            let seconds = ctx.rng.random_range(min..max);
            let instant = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "column '{name}': generated instant {seconds}s is out of range"
                ))
            })?;
            Ok(Value::Text(
                instant.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
            ))
        }
        ValueKind::Enum { choices } => {
            let choice = &choices[ctx.rng.random_range(0..choices.len())];
            Ok(Value::Text(choice.clone()))
        }
        ValueKind::Geohash { length } => {
            let lat = numeric_row_value(name, "lat", row, schema)?;
            let long = numeric_row_value(name, "long", row, schema)?;
            let hash = geohash::encode(Coord { x: long, y: lat }, *length).map_err(|err| {
                Error::InvalidSchema(format!("column '{name}': cannot geohash: {err}"))
            })?;
            Ok(Value::Text(hash))
        }
        ValueKind::Literal { text } => Ok(Value::Text(text.clone())),
        ValueKind::Int {
            reference,
            min,
            max,
        } => {
            let offset = match reference {
                Some(column) => integer_row_value(name, column, row, schema)?,
                None => 0,
            };
            Ok(Value::Int(ctx.rng.random_range(offset + min..offset + max)))
        }
        ValueKind::Float { min, max } => Ok(Value::Float(ctx.rng.random_range(*min..=*max))),
        ValueKind::LiteralNumber(NumberLiteral::Int(value)) => Ok(Value::Int(*value)),
        ValueKind::LiteralNumber(NumberLiteral::Float(value)) => Ok(Value::Float(*value)),
        ValueKind::List {
            min_items,
            max_items,
            item,
        } => {
            let target = ctx.rng.random_range(*min_items..=*max_items);
            let mut items: Vec<Value> = Vec::with_capacity(target);
            let mut attempts = 0u32;
            // items are deduplicated by value equality, so a collision
            // does not count toward the target
            while items.len() < target {
                if attempts >= ctx.max_list_attempts {
                    return Err(Error::InvalidSchema(format!(
                        "column '{name}': could not generate {target} distinct list items \
                         within {attempts} attempts"
                    ))
                    .into());
                }
                attempts += 1;
                let candidate = generate_value(name, item, row, schema, ctx)?;
                if !items.contains(&candidate) {
                    items.push(candidate);
                }
            }
            Ok(Value::List(items))
        }
    }
}

fn row_value<'r>(
    name: &str,
    column: &str,
    row: &'r [Value],
    schema: &TableSchema,
) -> Result<&'r Value, GenerationError> {
    let index = schema.column_index(column).ok_or_else(|| {
        Error::InvalidSchema(format!(
            "column '{name}' references unknown column '{column}'"
        ))
    })?;
    row.get(index).ok_or_else(|| {
        Error::InvalidSchema(format!(
            "column '{name}' references column '{column}', which is generated later"
        ))
        .into()
    })
}

fn numeric_row_value(
    name: &str,
    column: &str,
    row: &[Value],
    schema: &TableSchema,
) -> Result<f64, GenerationError> {
    let value = row_value(name, column, row, schema)?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|text| text.parse::<f64>().ok()))
        .ok_or_else(|| {
            Error::InvalidSchema(format!(
                "column '{name}': referenced column '{column}' is not numeric"
            ))
            .into()
        })
}

fn integer_row_value(
    name: &str,
    column: &str,
    row: &[Value],
    schema: &TableSchema,
) -> Result<i64, GenerationError> {
    let value = row_value(name, column, row, schema)?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|text| text.parse::<i64>().ok()))
        .ok_or_else(|| {
            Error::InvalidSchema(format!(
                "column '{name}': referenced column '{column}' is not an integer"
            ))
            .into()
        })
}

/// Parse a previously generated date value back into epoch seconds.
/// Accepts the formats we emit plus a bare date.
fn parse_instant(name: &str, text: &str) -> Result<i64, GenerationError> {
    if let Ok(instant) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(instant.and_utc().timestamp());
    }
    if let Ok(instant) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(instant.and_utc().timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp());
    }
    Err(Error::InvalidSchema(format!(
        "column '{name}': cannot parse '{text}' as a date"
    ))
    .into())
}

/// Random v4 UUID drawn from the run RNG, so seeded runs reproduce.
fn random_uuid(rng: &mut ChaCha8Rng) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}
