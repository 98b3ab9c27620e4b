//! Catalog loading and normalization.
//!
//! The course catalog is seeded from a JSON file: an array of entries with
//! `code`, `name`, `credit` and `time` fields. Upstream listing data is
//! messy (credits arrive as numbers or strings, fields go missing), so every
//! entry is normalized before it reaches the repository, and the catalog is
//! sorted by course code and then by time encoding for a stable listing
//! order.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::api::{Course, CourseId};

/// Raw catalog entry as it appears in the seed file.
#[derive(serde::Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    credit: Option<serde_json::Value>,
    #[serde(default)]
    time: Option<String>,
}

/// Parse a catalog from a JSON string.
///
/// Entries are normalized (missing code becomes `"N/A"`, missing name
/// `"Unknown"`, unparseable credit `0`, missing time `"-"`) and the result is
/// sorted by code, then by time encoding.
pub fn parse_catalog_json_str(json: &str) -> Result<Vec<Course>> {
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(json).context("Invalid catalog JSON")?;

    let mut courses: Vec<Course> = entries.into_iter().map(normalize_entry).collect();
    courses.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.time.cmp(&b.time)));

    Ok(courses)
}

/// Load and parse a catalog seed file.
pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> Result<Vec<Course>> {
    let content = fs::read_to_string(path.as_ref()).with_context(|| {
        format!("Failed to read catalog file {}", path.as_ref().display())
    })?;
    parse_catalog_json_str(&content)
}

fn normalize_entry(entry: CatalogEntry) -> Course {
    Course {
        id: entry.id.map(CourseId::new),
        code: non_empty_or(entry.code, "N/A"),
        name: non_empty_or(entry.name, "Unknown"),
        credit: coerce_credit(entry.credit),
        time: non_empty_or(entry.time, "-"),
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// Credits appear as JSON numbers or as strings in exported listings; both
/// are accepted, with `0` as the fallback for anything unparseable.
fn coerce_credit(value: Option<serde_json::Value>) -> u32 {
    match value {
        Some(serde_json::Value::Number(n)) => {
            n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
        }
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_sorts_by_code_then_time() {
        let json = r#"[
            {"code": "CS102", "name": "Data Structures", "credit": 3, "time": "We09:00-12:00 SC45"},
            {"code": "CS101", "name": "Intro B", "credit": 3, "time": "We13:00-16:00 SC45"},
            {"code": "CS101", "name": "Intro A", "credit": 3, "time": "Mo09:00-12:00 SC45"}
        ]"#;

        let courses = parse_catalog_json_str(json).unwrap();
        assert_eq!(courses.len(), 3);
        assert_eq!(courses[0].name, "Intro A");
        assert_eq!(courses[1].name, "Intro B");
        assert_eq!(courses[2].code, "CS102");
    }

    #[test]
    fn test_missing_fields_are_normalized() {
        let courses = parse_catalog_json_str(r#"[{}]"#).unwrap();
        assert_eq!(courses[0].code, "N/A");
        assert_eq!(courses[0].name, "Unknown");
        assert_eq!(courses[0].credit, 0);
        assert_eq!(courses[0].time, "-");
        assert_eq!(courses[0].id, None);
    }

    #[test]
    fn test_credit_accepts_string_and_number() {
        let json = r#"[
            {"code": "A", "name": "a", "credit": "3", "time": "-"},
            {"code": "B", "name": "b", "credit": 2, "time": "-"},
            {"code": "C", "name": "c", "credit": "many", "time": "-"}
        ]"#;

        let courses = parse_catalog_json_str(json).unwrap();
        assert_eq!(courses[0].credit, 3);
        assert_eq!(courses[1].credit, 2);
        assert_eq!(courses[2].credit, 0);
    }

    #[test]
    fn test_out_of_range_credit_falls_back_to_zero() {
        let json = r#"[
            {"code": "A", "name": "a", "credit": 4294967296, "time": "-"},
            {"code": "B", "name": "b", "credit": 4294967299, "time": "-"},
            {"code": "C", "name": "c", "credit": -3, "time": "-"}
        ]"#;

        let courses = parse_catalog_json_str(json).unwrap();
        assert_eq!(courses[0].credit, 0);
        assert_eq!(courses[1].credit, 0);
        assert_eq!(courses[2].credit, 0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_catalog_json_str("not json").is_err());
        assert!(parse_catalog_json_str(r#"{"code": "CS101"}"#).is_err());
    }
}
