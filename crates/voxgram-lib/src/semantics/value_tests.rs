use voxgram_core::Colors;

use super::*;

fn person() -> Value {
    Value::Object(vec![
        ("age".into(), Value::Number(15.0)),
        ("name".into(), "rob".into()),
        ("nickname".into(), Value::Undefined),
    ])
}

#[test]
fn display_follows_to_string() {
    assert_eq!(Value::Number(15.0).to_string(), "15");
    assert_eq!(Value::Number(-0.0).to_string(), "0");
    assert_eq!(Value::Number(0.5).to_string(), "0.5");
    assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Undefined.to_string(), "undefined");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(person().to_string(), "[object Object]");
}

#[test]
fn serializes_to_json() {
    let json = serde_json::to_string(&person()).unwrap();
    assert_eq!(json, r#"{"age":15,"name":"rob","nickname":null}"#);

    let json = serde_json::to_string(&Value::Number(1.25)).unwrap();
    assert_eq!(json, "1.25");
}

#[test]
fn format_pretty_and_compact() {
    let value = person();

    insta::assert_snapshot!(value.format(true, Colors::OFF), @r#"
    {
      "age": 15,
      "name": "rob",
      "nickname": null
    }
    "#);
    insta::assert_snapshot!(
        value.format(false, Colors::OFF),
        @r#"{"age":15,"name":"rob","nickname":null}"#
    );
}

#[test]
fn format_escapes_strings() {
    let value = Value::from("say \"hi\"\n");
    assert_eq!(value.format(false, Colors::OFF), r#""say \"hi\"\n""#);
}

#[test]
fn format_colors_keys_and_strings() {
    let value = Value::Object(vec![("name".into(), "rob".into())]);
    let out = value.format(false, Colors::ON);
    assert!(out.contains("\x1b[34m\"name\"\x1b[0m"));
    assert!(out.contains("\x1b[32m\"rob\"\x1b[0m"));
}

#[test]
fn set_replaces_in_place() {
    let mut value = person();
    assert!(value.set("age", Value::Number(16.0)));
    assert!(value.set("city", "paris".into()));

    assert_eq!(value.get("age"), Some(&Value::Number(16.0)));
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"age":16,"name":"rob","nickname":null,"city":"paris"}"#
    );
    assert!(!Value::Null.set("age", Value::Null));
}
