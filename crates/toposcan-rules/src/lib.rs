// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Invariant engine: a fixed, compiled-in battery of structural rules.
//!
//! Each rule is a total predicate over a single service. Rules are pure,
//! stateless and independent: no rule reads another rule's output, none
//! short-circuits another, and `depends_on` edges are never traversed.

use toposcan_model::{ConfigIr, InvariantViolation, Protocol, Service, ServiceKind, Severity};

pub const CRATE_NAME: &str = "toposcan-rules";

pub const RULE_NO_PUBLIC_DB: &str = "R1_NO_PUBLIC_DB";
pub const RULE_PUBLIC_REQUIRES_TLS: &str = "R2_PUBLIC_REQUIRES_TLS";
pub const RULE_NO_PII_PUBLIC: &str = "R3_NO_PII_PUBLIC";
pub const RULE_RESOURCE_LIMITS: &str = "R4_RESOURCE_LIMITS";

#[derive(Debug, Clone, Copy)]
struct RuleSpec {
    id: &'static str,
    severity: Severity,
    description: &'static str,
    trigger: fn(&Service) -> bool,
}

const RULES: &[RuleSpec] = &[
    RuleSpec {
        id: RULE_NO_PUBLIC_DB,
        severity: Severity::High,
        description: "databases must not be internet-reachable",
        trigger: public_db,
    },
    RuleSpec {
        id: RULE_PUBLIC_REQUIRES_TLS,
        severity: Severity::High,
        description: "public HTTP-only services lack TLS",
        trigger: public_http_without_tls,
    },
    RuleSpec {
        id: RULE_NO_PII_PUBLIC,
        severity: Severity::High,
        description: "PII-handling services must not be directly exposed",
        trigger: pii_and_public,
    },
    RuleSpec {
        id: RULE_RESOURCE_LIMITS,
        severity: Severity::Medium,
        description: "capacity/isolation requires explicit resource limits",
        trigger: limits_not_fully_defined,
    },
];

fn public_db(service: &Service) -> bool {
    service.kind == ServiceKind::Db
        && (service.public || service.network.iter().any(|b| b.host == "0.0.0.0"))
}

/// Fires only on the specific "HTTP without HTTPS" anti-pattern: a service
/// with neither protocol listed (e.g. TCP-only) does not trigger.
fn public_http_without_tls(service: &Service) -> bool {
    service.public
        && service.network.iter().any(|b| b.protocol == Protocol::Http)
        && !service.network.iter().any(|b| b.protocol == Protocol::Https)
}

fn pii_and_public(service: &Service) -> bool {
    service.handles_pii && service.public
}

fn limits_not_fully_defined(service: &Service) -> bool {
    !service
        .resource_limits
        .as_ref()
        .is_some_and(|limits| limits.is_fully_defined())
}

/// Runs every rule against every service in service order and concatenates
/// the findings. A service may trigger zero, one, or several rules.
#[must_use]
pub fn evaluate(ir: &ConfigIr) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for service in &ir.services {
        for rule in RULES {
            if (rule.trigger)(service) {
                violations.push(InvariantViolation::new(
                    rule.id,
                    rule.description,
                    &service.name,
                    rule.severity,
                ));
            }
        }
    }
    violations
}
