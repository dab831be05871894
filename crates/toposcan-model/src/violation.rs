use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One finding from invariant evaluation: which rule fired, on which
/// service, at what severity. Produced fresh on every evaluation; never
/// mutated or merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct InvariantViolation {
    pub id: String,
    pub description: String,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub severity: Severity,
}

impl InvariantViolation {
    #[must_use]
    pub fn new(id: &str, description: &str, service_name: &str, severity: Severity) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            service_name: service_name.to_string(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Severity;

    #[test]
    fn severity_names_are_lowercase() {
        assert_eq!(Severity::Low.as_str(), "low");
        assert_eq!(Severity::Medium.as_str(), "medium");
        assert_eq!(Severity::High.as_str(), "high");
    }
}
