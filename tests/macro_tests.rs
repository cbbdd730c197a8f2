use json_data::{json, to_string, Map, Value};

#[test]
fn test_json_macro_null() {
    let value = json!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_json_macro_booleans() {
    assert_eq!(json!(true), Value::Bool(true));
    assert_eq!(json!(false), Value::Bool(false));
}

#[test]
fn test_json_macro_numbers() {
    assert_eq!(json!(42), Value::number(42.0));
    assert_eq!(json!(3.5), Value::number(3.5));
    assert_eq!(json!(-123), Value::number(-123.0));
}

#[test]
fn test_json_macro_strings() {
    assert_eq!(json!("hello world"), Value::string("hello world"));
    assert_eq!(json!(""), Value::string(""));
}

#[test]
fn test_json_macro_arrays() {
    assert_eq!(json!([]), Value::array());

    let array = json!([1, 2, 3]);
    assert_eq!(
        array,
        Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
    );

    let mixed = json!([1, "two", true, null]);
    assert_eq!(to_string(&mixed).unwrap(), r#"[1,"two",true,null]"#);
}

#[test]
fn test_json_macro_objects() {
    assert_eq!(json!({}), Value::object());

    let object = json!({
        "name": "Alice",
        "age": 30
    });

    let mut expected = Map::new();
    expected.append("name".to_string(), Value::string("Alice"));
    expected.append("age".to_string(), Value::from(30));
    assert_eq!(object, Value::Object(expected));
}

#[test]
fn test_json_macro_keeps_written_order() {
    let object = json!({"z": 1, "a": 2, "m": 3});
    let keys: Vec<&String> = object.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_json_macro_nested() {
    let doc = json!({
        "version": "0.32.1",
        "spellbooks": {
            "Book of Minor Magic": {
                "spells": ["Magic Dart", "Summon Small Mammal", "Freeze"],
                "value": 150
            }
        },
        "unrands": []
    });

    assert_eq!(
        to_string(&doc).unwrap(),
        r#"{"version":"0.32.1","spellbooks":{"Book of Minor Magic":{"spells":["Magic Dart","Summon Small Mammal","Freeze"],"value":150}},"unrands":[]}"#
    );
}

#[test]
fn test_json_macro_with_variables() {
    let level = 4;
    let name = "Flame Wave";
    let flags = vec![Value::string("area"), Value::string("noisy")];

    let doc = json!({
        "name": name,
        "level": level,
        "flags": flags
    });

    assert_eq!(doc.get("name").and_then(Value::as_str), Some("Flame Wave"));
    assert_eq!(doc.get("level").and_then(Value::as_i64), Some(4));
    assert_eq!(doc.get("flags").and_then(Value::as_array).map(Vec::len), Some(2));
}

#[test]
fn test_json_macro_duplicate_keys_are_kept() {
    let doc = json!({"flag": 1, "flag": 2});
    assert_eq!(doc.as_object().unwrap().len(), 2);
    assert_eq!(doc.get("flag"), Some(&Value::from(2)));
}
