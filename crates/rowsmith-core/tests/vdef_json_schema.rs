use rowsmith_core::ValueDefDoc;
use schemars::schema_for;

#[test]
fn json_schema_describes_the_document_contract() {
    let generated = schema_for!(ValueDefDoc);
    let schema = serde_json::to_value(&generated).expect("serialize generated schema");

    let required = schema["required"].as_array().expect("required fields");
    assert!(required.contains(&serde_json::json!("column_order")));
    assert!(required.contains(&serde_json::json!("columns")));

    assert_eq!(schema["properties"]["column_order"]["type"], "array");
    assert_eq!(schema["properties"]["columns"]["type"], "object");

    let column = &schema["definitions"]["ColumnDefDoc"];
    let column_required = column["required"].as_array().expect("column required");
    assert_eq!(column_required, &vec![serde_json::json!("type")]);
    let props = column["properties"].as_object().expect("column properties");
    for key in ["type", "format", "range", "item", "linked"] {
        assert!(props.contains_key(key), "missing property {key}");
    }
}
