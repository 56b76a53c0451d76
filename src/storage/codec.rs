//! Decoding of loosely typed columns at the store boundary.
//!
//! Capability columns are JSON arrays written by several generations of
//! clients. Ids may arrive as numbers or numeric strings; anything else is
//! dropped with a warning so the search engine only ever sees typed sets.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::warn;

use crate::core::ProfessionalTag;
use crate::error::{EditoraError, Result};

fn parse_array(column: &str, raw: &str) -> Result<Vec<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(EditoraError::Serialization(format!(
            "column {column}: expected JSON array, found {other}"
        ))),
        Err(err) => Err(EditoraError::Serialization(format!(
            "column {column}: {err}"
        ))),
    }
}

pub fn decode_id_set(column: &str, raw: &str) -> Result<BTreeSet<u32>> {
    let mut ids = BTreeSet::new();
    for item in parse_array(column, raw)? {
        let id = match &item {
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        match id {
            Some(id) => {
                ids.insert(id);
            }
            None => warn!(column, value = %item, "dropping non-numeric id"),
        }
    }
    Ok(ids)
}

pub fn decode_tags(column: &str, raw: &str) -> Result<Vec<String>> {
    let mut tags = Vec::new();
    for item in parse_array(column, raw)? {
        match item {
            Value::String(s) if !s.trim().is_empty() => tags.push(s.trim().to_string()),
            Value::Number(n) => tags.push(n.to_string()),
            other => warn!(column, value = %other, "dropping non-text tag"),
        }
    }
    Ok(tags)
}

pub fn encode_id_set(ids: &BTreeSet<u32>) -> Result<String> {
    Ok(serde_json::to_string(ids)?)
}

pub fn encode_tags(tags: &[String]) -> Result<String> {
    Ok(serde_json::to_string(tags)?)
}

/// NULL and empty decode as unset; text outside the known kinds is kept.
pub fn decode_professional_type(raw: Option<&str>) -> Option<ProfessionalTag> {
    let tag = ProfessionalTag::from_stored(raw?)?;
    if let ProfessionalTag::Unrecognized(value) = &tag {
        warn!(value = %value, "unrecognized professional type kept verbatim");
    }
    Some(tag)
}

pub fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| EditoraError::Serialization(format!("column {column}: {err}")))
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub fn parse_date(column: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|err| EditoraError::Serialization(format!("column {column}: {err}")))
    })
    .transpose()
}

/// Counters and years are stored as SQLite integers; negatives clamp to zero.
pub fn non_negative_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub fn non_negative_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
