use serde::{Deserialize, Serialize};

/// Classification of a per-service change between two violation profiles.
/// Derived purely from violation-count comparison, never from severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RiskImpact {
    RiskIncrease,
    RiskDecrease,
    Neutral,
}

impl RiskImpact {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskIncrease => "risk_increase",
            Self::RiskDecrease => "risk_decrease",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ServiceChange {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub messages: Vec<String>,
    #[serde(rename = "riskImpact")]
    pub risk_impact: RiskImpact,
}

impl ServiceChange {
    #[must_use]
    pub fn new(service_name: String, messages: Vec<String>, risk_impact: RiskImpact) -> Self {
        Self {
            service_name,
            messages,
            risk_impact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub struct DiffSummary {
    #[serde(rename = "totalNewViolations")]
    pub total_new_violations: u64,
    #[serde(rename = "totalResolvedViolations")]
    pub total_resolved_violations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct DiffResult {
    pub summary: DiffSummary,
    pub changes: Vec<ServiceChange>,
}

impl DiffResult {
    #[must_use]
    pub fn new(summary: DiffSummary, changes: Vec<ServiceChange>) -> Self {
        Self { summary, changes }
    }
}

#[cfg(test)]
mod tests {
    use super::RiskImpact;

    #[test]
    fn risk_impact_wire_names_are_snake_case() {
        assert_eq!(RiskImpact::RiskIncrease.as_str(), "risk_increase");
        assert_eq!(RiskImpact::RiskDecrease.as_str(), "risk_decrease");
        assert_eq!(RiskImpact::Neutral.as_str(), "neutral");
    }
}
