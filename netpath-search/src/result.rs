use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Address the path search emits when a side has no intermediate VM host.
pub const NO_HOST_IP: &str = "255.255.255.255";

/// One row of a health search, kept as the raw field map.
pub type HealthRecord = serde_json::Map<String, Value>;

/// One flattened row of the NetOps path search.
///
/// Every field is a string, as the search emits it. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathRecord {
    #[serde(deserialize_with = "field")]
    pub src_ip: String,
    #[serde(deserialize_with = "field")]
    pub src_type: String,
    #[serde(deserialize_with = "field")]
    pub src_vm_name: String,
    #[serde(deserialize_with = "field")]
    pub src_name: String,
    #[serde(deserialize_with = "field")]
    pub src_vhost_ip: String,
    #[serde(deserialize_with = "field")]
    pub src_vhost_name: String,
    #[serde(deserialize_with = "field")]
    pub dest_ip: String,
    #[serde(deserialize_with = "field")]
    pub dest_type: String,
    #[serde(deserialize_with = "field")]
    pub dest_vm_name: String,
    #[serde(deserialize_with = "field")]
    pub dest_name: String,
    #[serde(deserialize_with = "field")]
    pub dest_vhost_ip: String,
    #[serde(deserialize_with = "field")]
    pub dest_vhost_name: String,
    /// Serialized hop list, `{id,type,ip,in,out}{...}`, tail first.
    #[serde(deserialize_with = "field")]
    pub nodes: String,
    /// `T` when the search could attribute the traffic end to end.
    #[serde(deserialize_with = "field")]
    pub resolved: String,
    #[serde(deserialize_with = "field")]
    pub direction: String,
    #[serde(deserialize_with = "field")]
    pub traffic: String,
}

impl PathRecord {
    pub fn new(src_ip: &str, dest_ip: &str) -> Self {
        Self {
            src_ip: src_ip.to_string(),
            dest_ip: dest_ip.to_string(),
            src_vhost_ip: NO_HOST_IP.to_string(),
            dest_vhost_ip: NO_HOST_IP.to_string(),
            ..Default::default()
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved == "T"
    }

    pub fn is_backward(&self) -> bool {
        self.direction == "backward"
    }

    pub fn src_vhost(&self) -> Option<&str> {
        host_ip(&self.src_vhost_ip)
    }

    pub fn dest_vhost(&self) -> Option<&str> {
        host_ip(&self.dest_vhost_ip)
    }
}

fn host_ip(ip: &str) -> Option<&str> {
    let ip = ip.trim();
    if ip.is_empty() || ip == NO_HOST_IP {
        None
    } else {
        Some(ip)
    }
}

/// Accepts any JSON scalar for a string field. Multivalue fields keep their
/// first value.
fn field<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(values) => values.first().map(value_to_string).unwrap_or_default(),
        Value::Object(_) => value.to_string(),
    }
}
