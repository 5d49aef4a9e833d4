// Loading exported search results from disk

use crate::error::{Result, SearchError};
use crate::result::{HealthRecord, PathRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Envelope keys Splunk writes around result rows that are not row data.
const ENVELOPE_KEYS: &[&str] = &[
    "preview",
    "offset",
    "init_offset",
    "lastrow",
    "messages",
    "fields",
    "highlighted",
];

pub fn load_path_records(path: &Path) -> Result<Vec<PathRecord>> {
    load_rows(path)
}

pub fn load_health_records(path: &Path) -> Result<Vec<HealthRecord>> {
    load_rows(path)
}

/// Read a result file in any of the supported export shapes.
pub fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)?;
    let rows = parse_rows(&content)?;
    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse search results from a `{"results": [...]}` document, a JSON array,
/// or JSON lines of `{"result": {...}}` / bare row objects.
pub fn parse_rows<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(document) = serde_json::from_str::<Value>(trimmed) {
        return rows_from_document(document);
    }

    debug!("Input is not a single JSON document, reading as JSON lines");
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line).map_err(|source| SearchError::MalformedRow {
            line: idx + 1,
            source,
        })?;

        if let Some(row) = unwrap_row(value) {
            let row = serde_json::from_value(row).map_err(|source| SearchError::MalformedRow {
                line: idx + 1,
                source,
            })?;
            rows.push(row);
        }
    }

    Ok(rows)
}

fn rows_from_document<T: DeserializeOwned>(document: Value) -> Result<Vec<T>> {
    let values = match document {
        Value::Array(values) => values,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(values)) => values,
            Some(other) => {
                return Err(SearchError::UnexpectedShape(format!(
                    "expected 'results' to be an array, found {}",
                    other
                )));
            }
            None => unwrap_row(Value::Object(map)).into_iter().collect(),
        },
        other => {
            return Err(SearchError::UnexpectedShape(format!(
                "expected a JSON object or array of rows, found {}",
                other
            )));
        }
    };

    values
        .into_iter()
        .filter_map(unwrap_row)
        .map(|row| serde_json::from_value(row).map_err(SearchError::from))
        .collect()
}

/// Strip the export envelope from a row. Envelope-only objects yield nothing.
fn unwrap_row(value: Value) -> Option<Value> {
    match value {
        Value::Object(mut map) => {
            if let Some(row) = map.remove("result") {
                return Some(row);
            }
            if !map.is_empty() && map.keys().all(|k| ENVELOPE_KEYS.contains(&k.as_str())) {
                debug!("Skipping envelope-only object");
                return None;
            }
            Some(Value::Object(map))
        }
        other => Some(other),
    }
}
