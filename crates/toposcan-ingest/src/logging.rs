// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    Decode,
    Validate,
    Fingerprint,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParseEvent {
    pub stage: ParseStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

/// Request-local record of parse pipeline steps. Collected per call, never
/// shared across invocations.
#[derive(Debug, Default, Clone)]
pub struct ParseLog {
    events: Vec<ParseEvent>,
}

impl ParseLog {
    pub fn emit(
        &mut self,
        stage: ParseStage,
        name: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) {
        self.events.push(ParseEvent {
            stage,
            name: name.into(),
            fields,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[ParseEvent] {
        &self.events
    }
}
