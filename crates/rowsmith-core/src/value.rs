use serde_json::Value as Json;

/// One generated value.
///
/// Linked columns always produce `Text`: keys are read verbatim from
/// the sibling dataset's CSV.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Plain JSON form: strings, numbers, and arrays as themselves.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Text(value) => Json::String(value.clone()),
            Value::Int(value) => Json::from(*value),
            Value::Float(value) => Json::from(*value),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    /// Flat string form used for wire-format fields and CSV cells.
    /// Lists render as their JSON array text.
    pub fn to_field(&self) -> String {
        match self {
            Value::Text(value) => value.clone(),
            Value::Int(value) => value.to_string(),
            Value::Float(value) => value.to_string(),
            Value::List(_) => self.to_json().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_preserves_types() {
        assert_eq!(Value::Int(42).to_json(), serde_json::json!(42));
        assert_eq!(Value::Float(0.5).to_json(), serde_json::json!(0.5));
        assert_eq!(
            Value::Text("abc".to_string()).to_json(),
            serde_json::json!("abc")
        );
        let list = Value::List(vec![
            Value::Text("a".to_string()),
            Value::Text("b".to_string()),
        ]);
        assert_eq!(list.to_json(), serde_json::json!(["a", "b"]));
    }

    #[test]
    fn field_form_stringifies_numbers() {
        assert_eq!(Value::Int(42).to_field(), "42");
        assert_eq!(Value::Float(1.25).to_field(), "1.25");
    }

    #[test]
    fn field_form_renders_lists_as_json_text() {
        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list.to_field(), "[1,2]");
    }
}
