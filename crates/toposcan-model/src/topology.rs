use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Protocol {
    Http,
    Https,
    Tcp,
}

impl Protocol {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Tcp => "tcp",
        }
    }

    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "tcp" => Some(Self::Tcp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ServiceKind {
    Api,
    Db,
    Queue,
    Cache,
}

impl ServiceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Db => "db",
            Self::Queue => "queue",
            Self::Cache => "cache",
        }
    }

    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "api" => Some(Self::Api),
            "db" => Some(Self::Db),
            "queue" => Some(Self::Queue),
            "cache" => Some(Self::Cache),
            _ => None,
        }
    }
}

/// One listening endpoint of a service. Immutable once constructed; owned
/// exclusively by its [`Service`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NetworkBinding {
    pub host: String,
    pub port: u32,
    pub protocol: Protocol,
}

impl NetworkBinding {
    #[must_use]
    pub fn new(host: String, port: u32, protocol: Protocol) -> Self {
        Self {
            host,
            port,
            protocol,
        }
    }
}

/// Declared capacity limits. Rules treat partial presence the same as
/// absence: limits count as defined only when both fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub struct ResourceLimits {
    pub cpu: Option<f64>,
    #[serde(rename = "memoryMb")]
    pub memory_mb: Option<f64>,
}

impl ResourceLimits {
    #[must_use]
    pub fn new(cpu: Option<f64>, memory_mb: Option<f64>) -> Self {
        Self { cpu, memory_mb }
    }

    /// True when both `cpu` and `memoryMb` are present.
    #[must_use]
    pub fn is_fully_defined(&self) -> bool {
        self.cpu.is_some() && self.memory_mb.is_some()
    }
}

/// One service in a topology. `name` is the join key for every downstream
/// lookup (diff indexing, violation attribution); uniqueness of names and
/// referential integrity of `depends_on` are accepted as data, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Service {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub public: bool,
    #[serde(rename = "handlesPII")]
    pub handles_pii: bool,
    pub network: Vec<NetworkBinding>,
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<String>,
    #[serde(rename = "resourceLimits")]
    pub resource_limits: Option<ResourceLimits>,
}

impl Service {
    #[must_use]
    pub fn new(
        name: String,
        kind: ServiceKind,
        public: bool,
        handles_pii: bool,
        network: Vec<NetworkBinding>,
        depends_on: Vec<String>,
        resource_limits: Option<ResourceLimits>,
    ) -> Self {
        Self {
            name,
            kind,
            public,
            handles_pii,
            network,
            depends_on,
            resource_limits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ConfigMetadata {
    #[serde(rename = "sourceFormat")]
    pub source_format: SourceFormat,
    /// First 12 hex characters of the SHA-256 digest over the raw input
    /// text. Derived at parse time, never mutated.
    #[serde(rename = "rawHash")]
    pub raw_hash: Option<String>,
}

/// The canonical typed form of a configuration, independent of source
/// syntax. Constructed once by the parser, immutable thereafter, discarded
/// at the end of a single analyze/diff request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ConfigIr {
    pub services: Vec<Service>,
    pub metadata: ConfigMetadata,
}

impl ConfigIr {
    #[must_use]
    pub fn new(services: Vec<Service>, source_format: SourceFormat, raw_hash: String) -> Self {
        Self {
            services,
            metadata: ConfigMetadata {
                source_format,
                raw_hash: Some(raw_hash),
            },
        }
    }

    #[must_use]
    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Protocol, ResourceLimits, ServiceKind};

    #[test]
    fn protocol_round_trips_through_parse() {
        for p in [Protocol::Http, Protocol::Https, Protocol::Tcp] {
            assert_eq!(Protocol::parse(p.as_str()), Some(p));
        }
        assert_eq!(Protocol::parse("udp"), None);
    }

    #[test]
    fn service_kind_rejects_unknown_values() {
        assert_eq!(ServiceKind::parse("db"), Some(ServiceKind::Db));
        assert_eq!(ServiceKind::parse("worker"), None);
    }

    #[test]
    fn partial_limits_are_not_fully_defined() {
        assert!(ResourceLimits::new(Some(1.0), Some(512.0)).is_fully_defined());
        assert!(!ResourceLimits::new(Some(1.0), None).is_fully_defined());
        assert!(!ResourceLimits::new(None, Some(512.0)).is_fully_defined());
        assert!(!ResourceLimits::default().is_fully_defined());
    }
}
