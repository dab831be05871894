use serde_json::Value;
use toposcan_api::{analyze, diff_configs};
use toposcan_model::SourceFormat;

#[test]
fn failed_analyze_serializes_to_errors_only() {
    let outcome = analyze("services: [", SourceFormat::Yaml);
    let value = serde_json::to_value(&outcome).expect("serialize outcome");
    let obj = value.as_object().expect("object");
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["errors"]);
}

#[test]
fn successful_analyze_serializes_without_errors_key() {
    let outcome = analyze(
        "services:\n  - name: web\n    type: api\n",
        SourceFormat::Yaml,
    );
    let value = serde_json::to_value(&outcome).expect("serialize outcome");
    let obj = value.as_object().expect("object");
    assert!(obj.contains_key("ir"));
    assert!(obj.contains_key("violations"));
    assert!(!obj.contains_key("errors"));
    assert_eq!(value["ir"]["metadata"]["sourceFormat"], Value::from("yaml"));
}

#[test]
fn failed_diff_serializes_to_errors_only() {
    let outcome = diff_configs(
        "services: [",
        SourceFormat::Yaml,
        "services: []",
        SourceFormat::Yaml,
    );
    let value = serde_json::to_value(&outcome).expect("serialize outcome");
    let obj = value.as_object().expect("object");
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["errors"]);
}

#[test]
fn successful_diff_exposes_old_and_new_sides_on_the_wire() {
    let old_text = r#"{"services": [{"name": "db1", "type": "db", "public": true,
        "resourceLimits": {"cpu": 1, "memoryMb": 128}}]}"#;
    let new_text = r#"{"services": [{"name": "db1", "type": "db",
        "resourceLimits": {"cpu": 1, "memoryMb": 128}}]}"#;
    let outcome = diff_configs(old_text, SourceFormat::Json, new_text, SourceFormat::Json);
    let value = serde_json::to_value(&outcome).expect("serialize outcome");
    assert!(value.get("diff").is_some());
    assert!(value.get("oldIr").is_some());
    assert!(value.get("newIr").is_some());
    assert_eq!(
        value["diff"]["summary"]["totalResolvedViolations"],
        Value::from(1)
    );
    assert_eq!(value["oldViolations"][0]["id"], Value::from("R1_NO_PUBLIC_DB"));
    assert!(value.get("newViolations").is_none());
    assert!(value.get("errors").is_none());
}
