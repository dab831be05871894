#![forbid(unsafe_code)]
//! Toposcan model SSOT.
//!
//! The canonical typed representation of a service topology, the violation
//! shape produced by invariant evaluation, and the drift-diff output shape.
//! Pure data contract: no parsing, no rule logic.

mod drift;
mod topology;
mod violation;

pub use drift::{DiffResult, DiffSummary, RiskImpact, ServiceChange};
pub use topology::{
    ConfigIr, ConfigMetadata, NetworkBinding, Protocol, ResourceLimits, Service, ServiceKind,
    SourceFormat,
};
pub use violation::{InvariantViolation, Severity};

pub const CRATE_NAME: &str = "toposcan-model";
