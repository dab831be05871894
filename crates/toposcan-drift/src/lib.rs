// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Drift differencer: compares two (IR, violation-set) pairs and produces a
//! per-service risk-impact summary.
//!
//! Risk impact is derived purely from violation-count deltas, never from
//! severity or rule identity. A same-count rule swap therefore reports
//! `neutral`; this is the documented contract of the diff.

use std::collections::HashMap;

use toposcan_model::{
    ConfigIr, DiffResult, DiffSummary, InvariantViolation, RiskImpact, ServiceChange,
};

pub const CRATE_NAME: &str = "toposcan-drift";

/// Compares old and new violation profiles across the union of service
/// names. Changes are emitted in old-IR service order first, then new-only
/// services in new-IR order; a name with zero violations on both sides
/// produces no change entry even if other service fields differ.
#[must_use]
pub fn diff(
    old_ir: &ConfigIr,
    new_ir: &ConfigIr,
    old_violations: &[InvariantViolation],
    new_violations: &[InvariantViolation],
) -> DiffResult {
    let old_index = index_by_service(old_violations);
    let new_index = index_by_service(new_violations);

    let mut summary = DiffSummary::default();
    let mut changes = Vec::new();

    for name in union_of_names(old_ir, new_ir) {
        let old_set = old_index.get(name).map(Vec::as_slice).unwrap_or(&[]);
        let new_set = new_index.get(name).map(Vec::as_slice).unwrap_or(&[]);
        if old_set.is_empty() && new_set.is_empty() {
            continue;
        }

        let (message, impact) = classify(old_set.len(), new_set.len(), &mut summary);
        let mut messages = vec![message];
        if !new_set.is_empty() {
            messages.push(enumerate_current(new_set));
        }

        changes.push(ServiceChange::new(name.to_string(), messages, impact));
    }

    DiffResult::new(summary, changes)
}

/// Indexes a violation list by service name, preserving per-service
/// insertion order. A service absent from the list has an implicit empty
/// violation set.
fn index_by_service(
    violations: &[InvariantViolation],
) -> HashMap<&str, Vec<&InvariantViolation>> {
    let mut index: HashMap<&str, Vec<&InvariantViolation>> = HashMap::new();
    for violation in violations {
        index
            .entry(violation.service_name.as_str())
            .or_default()
            .push(violation);
    }
    index
}

/// Union of service names with set semantics: old-IR order first, then
/// names only present in the new IR, in new-IR order.
fn union_of_names<'a>(old_ir: &'a ConfigIr, new_ir: &'a ConfigIr) -> Vec<&'a str> {
    let mut names: Vec<&str> = old_ir.service_names();
    for name in new_ir.service_names() {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn classify(old_count: usize, new_count: usize, summary: &mut DiffSummary) -> (String, RiskImpact) {
    if old_count == 0 {
        summary.total_new_violations += new_count as u64;
        return (
            format!("{new_count} new violation(s) introduced"),
            RiskImpact::RiskIncrease,
        );
    }
    if new_count == 0 {
        summary.total_resolved_violations += old_count as u64;
        return (
            format!("{old_count} violation(s) resolved"),
            RiskImpact::RiskDecrease,
        );
    }
    if old_count == new_count {
        return (
            format!("Violations count unchanged ({new_count})"),
            RiskImpact::Neutral,
        );
    }
    if new_count > old_count {
        summary.total_new_violations += (new_count - old_count) as u64;
        (
            format!("Violations changed from {old_count} to {new_count}"),
            RiskImpact::RiskIncrease,
        )
    } else {
        summary.total_resolved_violations += (old_count - new_count) as u64;
        (
            format!("Violations changed from {old_count} to {new_count}"),
            RiskImpact::RiskDecrease,
        )
    }
}

fn enumerate_current(violations: &[&InvariantViolation]) -> String {
    let listed: Vec<String> = violations
        .iter()
        .map(|v| format!("{} ({})", v.id, v.severity.as_str()))
        .collect();
    format!("Current violations: {}", listed.join(", "))
}
