use serde_json::{Map, Value as Json};

use rowsmith_core::{TableSchema, TypeTag, Value};

/// Plain form: one JSON object per row, keys in column order.
pub fn plain_items(schema: &TableSchema, rows: &[Vec<Value>]) -> Json {
    let items = rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for (column, value) in schema.columns.iter().zip(row) {
                object.insert(column.name.clone(), value.to_json());
            }
            Json::Object(object)
        })
        .collect();
    Json::Array(items)
}

/// Wire form: each row wrapped as a put request whose item maps column
/// names to one-entry type-tagged objects, all collected under the
/// table name as the sole key.
pub fn wire_items(table: &str, schema: &TableSchema, rows: &[Vec<Value>]) -> Json {
    let items = rows
        .iter()
        .map(|row| {
            let mut item = Map::new();
            for (column, value) in schema.columns.iter().zip(row) {
                item.insert(column.name.clone(), wire_field(column.spec.type_tag, value));
            }
            let mut put = Map::new();
            put.insert("Item".to_string(), Json::Object(item));
            let mut request = Map::new();
            request.insert("PutRequest".to_string(), Json::Object(put));
            Json::Object(request)
        })
        .collect();

    let mut root = Map::new();
    root.insert(table.to_string(), Json::Array(items));
    Json::Object(root)
}

fn wire_field(tag: TypeTag, value: &Value) -> Json {
    let mut field = Map::new();
    match tag {
        TypeTag::List => {
            // list items are always emitted as strings in this form
            let items = match value {
                Value::List(items) => items
                    .iter()
                    .map(|item| tagged("S", item.to_field()))
                    .collect(),
                // a linked or literal scalar under an L column still
                // wraps as a one-entry list
                other => vec![tagged("S", other.to_field())],
            };
            field.insert("L".to_string(), Json::Array(items));
        }
        tag => {
            field.insert(tag.as_str().to_string(), Json::String(value.to_field()));
        }
    }
    Json::Object(field)
}

fn tagged(tag: &str, value: String) -> Json {
    let mut field = Map::new();
    field.insert(tag.to_string(), Json::String(value));
    Json::Object(field)
}

#[cfg(test)]
mod tests {
    use rowsmith_core::ValueDefDoc;

    use super::*;

    fn schema(json: &str) -> TableSchema {
        let doc: ValueDefDoc = serde_json::from_str(json).expect("parse document");
        TableSchema::resolve("t", &doc).expect("resolve schema")
    }

    #[test]
    fn wire_form_stringifies_numbers() {
        let schema = schema(
            r#"{ "column_order": ["answer"],
                 "columns": { "answer": { "type": "N", "format": "value", "range": "42" } } }"#,
        );
        let rows = vec![vec![Value::Int(42)]];

        let out = wire_items("t", &schema, &rows);
        assert_eq!(
            out["t"][0]["PutRequest"]["Item"]["answer"],
            serde_json::json!({ "N": "42" })
        );
    }

    #[test]
    fn wire_form_tags_list_items_as_strings() {
        let schema = schema(
            r#"{ "column_order": ["nums"],
                 "columns": { "nums": { "type": "L", "range": "1:2",
                     "item": { "type": "N", "format": "int", "range": "0:9" } } } }"#,
        );
        let rows = vec![vec![Value::List(vec![Value::Int(1), Value::Int(2)])]];

        let out = wire_items("t", &schema, &rows);
        assert_eq!(
            out["t"][0]["PutRequest"]["Item"]["nums"],
            serde_json::json!({ "L": [{ "S": "1" }, { "S": "2" }] })
        );
    }

    #[test]
    fn plain_form_keeps_column_order_and_values() {
        let schema = schema(
            r#"{ "column_order": ["b", "a"],
                 "columns": {
                     "b": { "type": "N", "format": "value", "range": "1" },
                     "a": { "type": "S", "format": "value", "range": "x" } } }"#,
        );
        let rows = vec![vec![Value::Int(1), Value::Text("x".to_string())]];

        let out = plain_items(&schema, &rows);
        let keys: Vec<&String> = out[0].as_object().expect("object").keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(out[0]["b"], serde_json::json!(1));
        assert_eq!(out[0]["a"], serde_json::json!("x"));
    }
}
