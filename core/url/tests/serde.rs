#![cfg(feature = "serde")]

use fluent_url::{Url, Authority, QueryParameters, QueryValue, Config, ArrayStyle};
use serde::{Serialize, Deserialize};
use serde::de::IntoDeserializer;
use serde::de::value::{F64Deserializer, Error as ValueError};
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Request {
    query: QueryParameters,
    authority: Authority,
}

#[test]
fn url_serializes_as_string() {
    let url = Url::new("https", "example.com").unwrap()
        .with_path("/a")
        .with_query_parameter("q", "x y").unwrap();

    let json = serde_json::to_string(&url).unwrap();
    assert_eq!(json, r#""https://example.com/a?q=x%20y""#);
}

#[test]
fn query_value_shapes() {
    assert_eq!(serde_json::to_string(&QueryValue::from("a")).unwrap(), r#""a""#);
    assert_eq!(serde_json::to_string(&QueryValue::from(vec!["a", "b"])).unwrap(), r#"["a","b"]"#);

    let single: QueryValue = serde_json::from_str(r#""a""#).unwrap();
    assert_eq!(single, "a");

    let number: QueryValue = serde_json::from_str("42").unwrap();
    assert_eq!(number, "42");

    let multi: QueryValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
    assert_eq!(multi, *["a", "b"].as_slice());

    assert!(serde_json::from_str::<QueryValue>(r#"{"a": 1}"#).is_err());
}

#[test]
fn query_values_collapse_like_conversions() {
    let float: QueryValue = serde_json::from_str("1.5").unwrap();
    assert_eq!(float, QueryValue::Single(1.5f64.to_string()));

    let mixed: QueryValue = serde_json::from_str(r#"["a", 1, true, 2.5]"#).unwrap();
    assert_eq!(mixed, *["a", "1", "1", "2.5"].as_slice());

    assert!(serde_json::from_str::<QueryValue>(r#"["a", ["b"]]"#).is_err());

    let nan: F64Deserializer<ValueError> = f64::NAN.into_deserializer();
    assert!(QueryValue::deserialize(nan).is_err());

    let query: QueryParameters = serde_json::from_str(r#"{"r": 1.5, "ids": [1, 2]}"#).unwrap();
    assert_eq!(query.to_string(), "r=1.5&ids=1&ids=2");
}

#[test]
fn query_parameters_keep_order() {
    let json = r#"{
        "query": { "z": "1", "a": ["2", "3"], "m": true },
        "authority": { "user": "bob", "port": 8080 }
    }"#;

    let request: Request = serde_json::from_str(json).unwrap();
    assert_eq!(request.query.names().collect::<Vec<_>>(), ["z", "a", "m"]);
    assert_eq!(request.query.to_string(), "z=1&a=2&a=3&m=1");
    assert_eq!(request.authority, Authority::new().with_user("bob").with_port(8080));

    let back = serde_json::to_string(&request).unwrap();
    assert_eq!(back, r#"{"query":{"z":"1","a":["2","3"],"m":"1"},"authority":{"user":"bob","port":8080}}"#);
}

#[test]
fn empty_parameter_name_is_rejected() {
    let result = serde_json::from_str::<QueryParameters>(r#"{"": "x"}"#);
    assert!(result.is_err());
}

#[test]
fn config_deserializes_with_defaults() {
    let config: Config = serde_json::from_str(r#"{"array_style": "brackets"}"#).unwrap();
    assert_eq!(config, Config { array_style: ArrayStyle::Brackets, space_as_plus: false });

    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}
