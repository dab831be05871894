// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use toposcan_model::SourceFormat;

use crate::ParseError;

/// Deserializes raw text per the format tag into a generic JSON tree.
/// Malformed text yields one descriptive error naming the format.
pub(crate) fn decode_tree(raw: &str, format: SourceFormat) -> Result<Value, ParseError> {
    match format {
        SourceFormat::Yaml => serde_yaml::from_str::<Value>(raw)
            .map_err(|e| ParseError(format!("invalid yaml syntax: {e}"))),
        SourceFormat::Json => serde_json::from_str::<Value>(raw)
            .map_err(|e| ParseError(format!("invalid json syntax: {e}"))),
    }
}
