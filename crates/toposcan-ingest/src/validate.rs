// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use toposcan_model::{NetworkBinding, Protocol, ResourceLimits, Service, ServiceKind};

/// Validates the generic tree against the topology schema and builds the
/// service list. Permissive on unknown keys, strict on required shape.
/// All field errors for one parse attempt are collected and returned
/// together; a missing or null `services` key is an empty topology.
pub(crate) fn validate_tree(root: &Value) -> Result<Vec<Service>, Vec<String>> {
    let mut errors = Vec::new();

    let Some(root_obj) = root.as_object() else {
        return Err(vec!["config root must be an object".to_string()]);
    };

    let entries: &[Value] = match root_obj.get("services") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(vec!["services: must be a sequence".to_string()]);
        }
    };

    let mut services = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let path = format!("services[{index}]");
        match validate_service(entry, &path, &mut errors) {
            Some(service) => services.push(service),
            None => continue,
        }
    }

    if errors.is_empty() {
        Ok(services)
    } else {
        Err(errors)
    }
}

fn validate_service(entry: &Value, path: &str, errors: &mut Vec<String>) -> Option<Service> {
    let Some(obj) = entry.as_object() else {
        errors.push(format!("{path}: must be an object"));
        return None;
    };

    let before = errors.len();

    let name = match obj.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            errors.push(format!("{path}.name: must be a non-empty string"));
            None
        }
        Some(_) => {
            errors.push(format!("{path}.name: must be a non-empty string"));
            None
        }
        None => {
            errors.push(format!("{path}.name: missing required field"));
            None
        }
    };

    let kind = match obj.get("type") {
        Some(Value::String(s)) => match ServiceKind::parse(s) {
            Some(kind) => Some(kind),
            None => {
                errors.push(format!("{path}.type: must be one of api, db, queue, cache"));
                None
            }
        },
        Some(_) => {
            errors.push(format!("{path}.type: must be one of api, db, queue, cache"));
            None
        }
        None => {
            errors.push(format!("{path}.type: missing required field"));
            None
        }
    };

    let public = optional_bool(obj.get("public"), path, "public", errors);
    let handles_pii = optional_bool(obj.get("handlesPII"), path, "handlesPII", errors);
    let network = validate_network(obj.get("network"), path, errors);
    let depends_on = validate_depends_on(obj.get("dependsOn"), path, errors);
    let resource_limits = validate_resource_limits(obj.get("resourceLimits"), path, errors);

    if errors.len() > before {
        return None;
    }

    Some(Service::new(
        name?,
        kind?,
        public,
        handles_pii,
        network,
        depends_on,
        resource_limits,
    ))
}

fn optional_bool(value: Option<&Value>, path: &str, field: &str, errors: &mut Vec<String>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.push(format!("{path}.{field}: must be a boolean"));
            false
        }
    }
}

fn validate_network(
    value: Option<&Value>,
    path: &str,
    errors: &mut Vec<String>,
) -> Vec<NetworkBinding> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(format!("{path}.network: must be a sequence"));
            return Vec::new();
        }
    };

    let mut bindings = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let binding_path = format!("{path}.network[{index}]");
        let Some(obj) = item.as_object() else {
            errors.push(format!("{binding_path}: must be an object"));
            continue;
        };

        let host = match obj.get("host") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(format!("{binding_path}.host: must be a string"));
                None
            }
            None => {
                errors.push(format!("{binding_path}.host: missing required field"));
                None
            }
        };

        let port = match obj.get("port") {
            Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(port) => Some(port),
                None => {
                    errors.push(format!(
                        "{binding_path}.port: must be a non-negative integer"
                    ));
                    None
                }
            },
            None => {
                errors.push(format!("{binding_path}.port: missing required field"));
                None
            }
        };

        let protocol = match obj.get("protocol") {
            Some(Value::String(s)) => match Protocol::parse(s) {
                Some(protocol) => Some(protocol),
                None => {
                    errors.push(format!(
                        "{binding_path}.protocol: must be one of http, https, tcp"
                    ));
                    None
                }
            },
            Some(_) => {
                errors.push(format!(
                    "{binding_path}.protocol: must be one of http, https, tcp"
                ));
                None
            }
            None => {
                errors.push(format!("{binding_path}.protocol: missing required field"));
                None
            }
        };

        if let (Some(host), Some(port), Some(protocol)) = (host, port, protocol) {
            bindings.push(NetworkBinding::new(host, port, protocol));
        }
    }
    bindings
}

fn validate_depends_on(value: Option<&Value>, path: &str, errors: &mut Vec<String>) -> Vec<String> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(format!("{path}.dependsOn: must be a sequence"));
            return Vec::new();
        }
    };

    let mut names = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => names.push(s.clone()),
            _ => errors.push(format!("{path}.dependsOn[{index}]: must be a string")),
        }
    }
    names
}

fn validate_resource_limits(
    value: Option<&Value>,
    path: &str,
    errors: &mut Vec<String>,
) -> Option<ResourceLimits> {
    let obj = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            errors.push(format!("{path}.resourceLimits: must be an object"));
            return None;
        }
    };

    let cpu = optional_number(obj.get("cpu"), path, "resourceLimits.cpu", errors);
    let memory_mb = optional_number(obj.get("memoryMb"), path, "resourceLimits.memoryMb", errors);
    Some(ResourceLimits::new(cpu, memory_mb))
}

fn optional_number(
    value: Option<&Value>,
    path: &str,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_f64() {
            Some(n) => Some(n),
            None => {
                errors.push(format!("{path}.{field}: must be a number"));
                None
            }
        },
    }
}
