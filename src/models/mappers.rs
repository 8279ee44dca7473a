//! Payload mappers
//!
//! Pure functions turning upstream catalog JSON into the client-facing
//! response shapes. Missing or oddly typed upstream fields map to null or
//! empty values rather than errors.

use std::collections::HashSet;

use serde_json::Value;

use crate::models::{AuthorResult, Identifiers, WorkDetail, WorkSummary};
use crate::upstream::CatalogUrls;

const AUTHORS_PREFIX: &str = "/authors/";
const WORKS_PREFIX: &str = "/works/";

/// Maps one `docs[]` element of an author search.
pub fn map_author_result(doc: &Value) -> AuthorResult {
    AuthorResult {
        id: strip_key(doc.get("key"), AUTHORS_PREFIX),
        name: non_empty_str(doc.get("name")),
        birth_date: non_empty_str(doc.get("birth_date")),
        top_work: non_empty_str(doc.get("top_work")),
        work_count: doc.get("work_count").and_then(Value::as_u64).unwrap_or(0),
    }
}

/// Maps one `entries[]` element of an author works listing.
pub fn map_work_summary(entry: &Value, urls: &CatalogUrls) -> WorkSummary {
    let subjects = subjects(entry);
    WorkSummary {
        id: strip_key(entry.get("key"), WORKS_PREFIX),
        title: non_empty_str(entry.get("title")),
        authors: author_keys(entry),
        first_publish_date: ["first_publish_date", "first_publish_year"]
            .iter()
            .filter_map(|field| entry.get(*field))
            .find(|v| is_truthy(v))
            .cloned(),
        series: series_from_subjects(&subjects),
        subjects,
        cover_url: cover_url(entry, urls),
    }
}

/// Maps a work document plus its editions into the detail shape.
pub fn map_work_detail(work: &Value, editions: &[Value], urls: &CatalogUrls) -> WorkDetail {
    let id = strip_key(work.get("key"), WORKS_PREFIX);
    let subjects = subjects(work);

    WorkDetail {
        title: non_empty_str(work.get("title")),
        description: description(work.get("description")),
        series: series_from_subjects(&subjects),
        subjects,
        authors: author_keys(work),
        identifiers: Identifiers {
            isbn: collect_isbns(editions),
            openlibrary: id.clone(),
        },
        cover_url: cover_url(work, urls),
        id,
    }
}

/// Returns the first subject mentioning "series", case-insensitively.
pub fn series_from_subjects(subjects: &[String]) -> Option<String> {
    subjects
        .iter()
        .find(|s| s.to_lowercase().contains("series"))
        .cloned()
}

// == Field Helpers ==
fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Removes the first occurrence of `prefix` from a key like `/works/OL1W`.
fn strip_key(value: Option<&Value>, prefix: &str) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(|key| key.replacen(prefix, "", 1))
        .filter(|id| !id.is_empty())
}

fn author_keys(doc: &Value) -> Vec<Option<String>> {
    doc.get("authors")
        .and_then(Value::as_array)
        .map(|authors| {
            authors
                .iter()
                .map(|a| strip_key(a.pointer("/author/key"), AUTHORS_PREFIX))
                .collect()
        })
        .unwrap_or_default()
}

fn subjects(doc: &Value) -> Vec<String> {
    doc.get("subjects")
        .and_then(Value::as_array)
        .map(|subjects| {
            subjects
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Description is either a bare string or a `{"type", "value"}` text object.
fn description(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        other => non_empty_str(other.get("value")),
    }
}

/// Builds the large cover URL from the first cover id, if it is usable.
fn cover_url(doc: &Value, urls: &CatalogUrls) -> Option<String> {
    let first = doc.get("covers")?.as_array()?.first()?;
    if !is_truthy(first) {
        return None;
    }
    let id = match first {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(urls.cover_by_id(&id))
}

/// De-duplicated ISBN-10 then ISBN-13 values of each edition, in order seen.
fn collect_isbns(editions: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut isbns = Vec::new();
    for edition in editions {
        for field in ["isbn_10", "isbn_13"] {
            let values = edition.get(field).and_then(Value::as_array);
            for isbn in values.into_iter().flatten().filter_map(Value::as_str) {
                if seen.insert(isbn) {
                    isbns.push(isbn.to_string());
                }
            }
        }
    }
    isbns
}

/// JavaScript-style truthiness, matching how upstream clients read these
/// loosely typed fields: null, false, 0 and "" are all "missing".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
