use toposcan_ingest::{parse_config, ParseError};
use toposcan_model::SourceFormat;

#[test]
fn malformed_yaml_reports_one_error_mentioning_the_format() {
    let err = parse_config("services:\n  - name: \"unterminated\n", SourceFormat::Yaml)
        .expect_err("syntax failure");
    assert!(err.0.contains("yaml"), "got: {}", err.0);
}

#[test]
fn malformed_json_reports_one_error_mentioning_the_format() {
    let err = parse_config("{\"services\": [}", SourceFormat::Json).expect_err("syntax failure");
    assert!(err.0.contains("json"), "got: {}", err.0);
}

#[test]
fn missing_required_type_names_the_field_path() {
    let err = parse_config("services:\n  - name: web\n", SourceFormat::Yaml)
        .expect_err("schema failure");
    assert_eq!(
        err,
        ParseError("services[0].type: missing required field".to_string())
    );
}

#[test]
fn schema_errors_are_aggregated_into_one_combined_message() {
    let text = r#"
services:
  - name: web
    type: webapp
  - type: db
    network:
      - host: 0.0.0.0
        protocol: gopher
"#;
    let err = parse_config(text, SourceFormat::Yaml).expect_err("schema failure");
    let parts: Vec<&str> = err.0.split("; ").collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], "services[0].type: must be one of api, db, queue, cache");
    assert_eq!(parts[1], "services[1].name: missing required field");
    assert_eq!(parts[2], "services[1].network[0].port: missing required field");
    assert_eq!(parts[3], "services[1].network[0].protocol: must be one of http, https, tcp");
}

#[test]
fn non_object_root_is_a_schema_error() {
    let err = parse_config("- just\n- a\n- list\n", SourceFormat::Yaml).expect_err("bad root");
    assert_eq!(err.0, "config root must be an object");
}

#[test]
fn wrong_typed_optional_fields_are_schema_errors() {
    let text = r#"{"services": [{"name": "web", "type": "api", "public": "yes", "dependsOn": [1]}]}"#;
    let err = parse_config(text, SourceFormat::Json).expect_err("schema failure");
    assert!(err.0.contains("services[0].public: must be a boolean"));
    assert!(err.0.contains("services[0].dependsOn[0]: must be a string"));
}

#[test]
fn negative_port_is_a_schema_error() {
    let text = r#"{"services": [{"name": "web", "type": "api",
        "network": [{"host": "h", "port": -1, "protocol": "http"}]}]}"#;
    let err = parse_config(text, SourceFormat::Json).expect_err("schema failure");
    assert_eq!(
        err.0,
        "services[0].network[0].port: must be a non-negative integer"
    );
}
