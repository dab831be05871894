// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Parser/Validator stage: raw YAML or JSON text in, [`ConfigIr`] out.
//!
//! A syntax failure short-circuits with a single error naming the format.
//! Schema failures are aggregated into one combined diagnostic listing every
//! offending field path. On success the IR carries a 12-hex content
//! fingerprint computed over the original raw text.

mod decode;
mod logging;
mod validate;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use toposcan_core::content_fingerprint;
use toposcan_model::{ConfigIr, SourceFormat};

pub use logging::{ParseEvent, ParseLog, ParseStage};

pub const CRATE_NAME: &str = "toposcan-ingest";

/// Separator used when joining per-field schema diagnostics into the one
/// aggregated error string callers receive.
pub const SCHEMA_ERROR_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parses and validates raw configuration text. Pure function of its
/// inputs; no side effects beyond computing the fingerprint.
pub fn parse_config(raw: &str, format: SourceFormat) -> Result<ConfigIr, ParseError> {
    let mut log = ParseLog::default();
    parse_config_with_log(raw, format, &mut log)
}

/// As [`parse_config`], recording a stage-tagged event per pipeline step.
pub fn parse_config_with_log(
    raw: &str,
    format: SourceFormat,
    log: &mut ParseLog,
) -> Result<ConfigIr, ParseError> {
    let tree = match decode::decode_tree(raw, format) {
        Ok(tree) => tree,
        Err(err) => {
            log.emit(
                ParseStage::Decode,
                "syntax_error",
                BTreeMap::from([("format".to_string(), format.as_str().to_string())]),
            );
            return Err(err);
        }
    };
    log.emit(
        ParseStage::Decode,
        "tree_decoded",
        BTreeMap::from([("format".to_string(), format.as_str().to_string())]),
    );

    let services = match validate::validate_tree(&tree) {
        Ok(services) => services,
        Err(field_errors) => {
            log.emit(
                ParseStage::Validate,
                "schema_rejected",
                BTreeMap::from([("error_count".to_string(), field_errors.len().to_string())]),
            );
            return Err(ParseError(field_errors.join(SCHEMA_ERROR_SEPARATOR)));
        }
    };
    log.emit(
        ParseStage::Validate,
        "schema_accepted",
        BTreeMap::from([("service_count".to_string(), services.len().to_string())]),
    );

    let raw_hash = content_fingerprint(raw);
    log.emit(
        ParseStage::Fingerprint,
        "fingerprint_computed",
        BTreeMap::from([("raw_hash".to_string(), raw_hash.clone())]),
    );

    Ok(ConfigIr::new(services, format, raw_hash))
}

#[cfg(test)]
mod tests {
    use super::{parse_config, parse_config_with_log, ParseLog, ParseStage};
    use toposcan_model::SourceFormat;

    const MINIMAL_YAML: &str = "services:\n  - name: web\n    type: api\n";

    #[test]
    fn parse_log_records_one_event_per_stage_on_success() {
        let mut log = ParseLog::default();
        let ir = parse_config_with_log(MINIMAL_YAML, SourceFormat::Yaml, &mut log)
            .expect("valid config");
        assert_eq!(ir.services.len(), 1);
        let stages: Vec<ParseStage> = log.events().iter().map(|e| e.stage.clone()).collect();
        assert_eq!(
            stages,
            vec![ParseStage::Decode, ParseStage::Validate, ParseStage::Fingerprint]
        );
    }

    #[test]
    fn parse_log_stops_at_the_failing_stage() {
        let mut log = ParseLog::default();
        let err = parse_config_with_log("services: [", SourceFormat::Yaml, &mut log)
            .expect_err("syntax error");
        assert!(err.0.contains("yaml"));
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].stage, ParseStage::Decode);
    }

    #[test]
    fn same_raw_text_yields_same_fingerprint() {
        let a = parse_config(MINIMAL_YAML, SourceFormat::Yaml).expect("parse a");
        let b = parse_config(MINIMAL_YAML, SourceFormat::Yaml).expect("parse b");
        assert_eq!(a.metadata.raw_hash, b.metadata.raw_hash);
        assert!(a.metadata.raw_hash.is_some());
    }
}
