// Device health rows grouped per device and interface

use crate::context::PathGraph;
use netpath_search::HealthRecord;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

const HEALTHY_FLOOR: i64 = 66;
const DEGRADED_FLOOR: i64 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    Healthy,
    Degraded,
    Critical,
    Unknown,
}

impl HealthGrade {
    /// Grade a health score. Scores are parsed like the search emits them,
    /// as a leading base-10 integer.
    pub fn from_score(score: Option<&Value>) -> Self {
        let parsed = match score {
            Some(Value::Number(n)) => n.as_f64().map(|f| f.trunc() as i64),
            Some(Value::String(s)) => parse_int_prefix(s),
            _ => None,
        };

        match parsed {
            Some(score) if score >= HEALTHY_FLOOR => HealthGrade::Healthy,
            Some(score) if score >= DEGRADED_FLOOR => HealthGrade::Degraded,
            Some(_) => HealthGrade::Critical,
            None => HealthGrade::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGrade::Healthy => "healthy",
            HealthGrade::Degraded => "degraded",
            HealthGrade::Critical => "critical",
            HealthGrade::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceHealth {
    /// The first row seen for the device
    pub info: HealthRecord,
    /// Latest row per SNMP interface index
    pub interfaces: BTreeMap<String, HealthRecord>,
}

impl DeviceHealth {
    pub fn grade(&self) -> HealthGrade {
        HealthGrade::from_score(self.info.get("min_health_score"))
    }
}

/// Group health rows by `device`, then by `snmp_index`.
pub fn group_health(rows: Vec<HealthRecord>) -> BTreeMap<String, DeviceHealth> {
    let mut devices: BTreeMap<String, DeviceHealth> = BTreeMap::new();

    for row in rows {
        let Some(device) = row.get("device").and_then(field_str) else {
            debug!("Skipping health row without a device");
            continue;
        };

        let entry = devices.entry(device).or_insert_with(|| DeviceHealth {
            info: row.clone(),
            interfaces: BTreeMap::new(),
        });

        if let Some(index) = row.get("snmp_index").and_then(field_str) {
            entry.interfaces.insert(index, row);
        }
    }

    devices
}

/// `device="a" OR device="b"` for every non-VM node in the graph.
pub fn health_device_filter(graph: &PathGraph) -> String {
    graph
        .nodes()
        .filter(|node| !node.node_type.is_vm())
        .map(|node| format!("device=\"{}\"", node.name))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn field_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_int_prefix(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let len = digits.bytes().take_while(|b| b.is_ascii_digit()).count();
    let value = digits[..len].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> HealthRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(HealthGrade::from_score(Some(&json!("90"))), HealthGrade::Healthy);
        assert_eq!(HealthGrade::from_score(Some(&json!("66"))), HealthGrade::Healthy);
        assert_eq!(HealthGrade::from_score(Some(&json!("65"))), HealthGrade::Degraded);
        assert_eq!(HealthGrade::from_score(Some(&json!(36))), HealthGrade::Degraded);
        assert_eq!(HealthGrade::from_score(Some(&json!("35.9"))), HealthGrade::Critical);
        assert_eq!(HealthGrade::from_score(Some(&json!("-4"))), HealthGrade::Critical);
        assert_eq!(HealthGrade::from_score(Some(&json!("n/a"))), HealthGrade::Unknown);
        assert_eq!(HealthGrade::from_score(None), HealthGrade::Unknown);
    }

    #[test]
    fn test_group_health_by_device_and_interface() {
        let rows = vec![
            row(json!({"device": "10.0.0.1", "snmp_index": "1", "min_health_score": "80", "seq": 1})),
            row(json!({"device": "10.0.0.1", "snmp_index": "2", "min_health_score": "20", "seq": 2})),
            row(json!({"device": "10.0.0.1", "snmp_index": "1", "min_health_score": "50", "seq": 3})),
            row(json!({"device": "10.0.0.2", "snmp_index": 7, "min_health_score": "30"})),
            row(json!({"snmp_index": "1"})),
        ];

        let devices = group_health(rows);
        assert_eq!(devices.len(), 2);

        let first = &devices["10.0.0.1"];
        assert_eq!(first.info["seq"], 1);
        assert_eq!(first.grade(), HealthGrade::Healthy);
        assert_eq!(first.interfaces.len(), 2);
        assert_eq!(first.interfaces["1"]["seq"], 3);

        let second = &devices["10.0.0.2"];
        assert_eq!(second.grade(), HealthGrade::Critical);
        assert!(second.interfaces.contains_key("7"));
    }
}
