// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Pipeline orchestration for transports (CLI, HTTP, UI).
//!
//! The whole pipeline is synchronous and request-scoped: each call parses,
//! evaluates and diffs freshly constructed values with no state shared
//! across invocations.

mod dto;

use toposcan_ingest::{parse_config, parse_config_with_log, ParseLog};
use toposcan_model::SourceFormat;

pub use dto::{AnalyzeOutcome, DiffOutcome};

pub const CRATE_NAME: &str = "toposcan-api";

/// Parse raw configuration text and evaluate the invariant battery.
#[must_use]
pub fn analyze(raw: &str, format: SourceFormat) -> AnalyzeOutcome {
    match parse_config(raw, format) {
        Ok(ir) => {
            let violations = toposcan_rules::evaluate(&ir);
            AnalyzeOutcome::success(ir, violations)
        }
        Err(err) => AnalyzeOutcome::failure(vec![err.0]),
    }
}

/// As [`analyze`], recording parse stage events into the caller's log.
#[must_use]
pub fn analyze_with_log(raw: &str, format: SourceFormat, log: &mut ParseLog) -> AnalyzeOutcome {
    match parse_config_with_log(raw, format, log) {
        Ok(ir) => {
            let violations = toposcan_rules::evaluate(&ir);
            AnalyzeOutcome::success(ir, violations)
        }
        Err(err) => AnalyzeOutcome::failure(vec![err.0]),
    }
}

/// Parse both sides independently, evaluate each, and diff the violation
/// profiles. Error lists from the two sides are concatenated (old first);
/// any failure skips the diff step entirely.
#[must_use]
pub fn diff_configs(
    old_raw: &str,
    old_format: SourceFormat,
    new_raw: &str,
    new_format: SourceFormat,
) -> DiffOutcome {
    let old_parsed = parse_config(old_raw, old_format);
    let new_parsed = parse_config(new_raw, new_format);

    let mut errors = Vec::new();
    if let Err(err) = &old_parsed {
        errors.push(err.0.clone());
    }
    if let Err(err) = &new_parsed {
        errors.push(err.0.clone());
    }
    let (Ok(old_ir), Ok(new_ir)) = (old_parsed, new_parsed) else {
        return DiffOutcome::failure(errors);
    };

    let old_violations = toposcan_rules::evaluate(&old_ir);
    let new_violations = toposcan_rules::evaluate(&new_ir);
    let diff = toposcan_drift::diff(&old_ir, &new_ir, &old_violations, &new_violations);

    DiffOutcome {
        diff: Some(diff),
        old_ir: Some(old_ir),
        new_ir: Some(new_ir),
        old_violations,
        new_violations,
        errors,
    }
}
