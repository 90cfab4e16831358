//! Layer 1 — structured data (ceilings 95 / 85).
//!
//! Scans JSON-LD blocks for a `JobPosting` object and maps its fields at
//! confidence 95; the first typed match across blocks wins. Independently,
//! social-sharing metadata (OpenGraph title / site name / description) fills
//! remaining gaps at 85, so a page with partial schema coverage still
//! benefits from its meta tags without overriding a full schema match.

use crate::detect::{Candidate, Field, FieldSet};
use crate::document::SourceDocument;
use serde_json::Value;

const SCHEMA_SOURCE: &str = "JSON-LD Schema";
const META_SOURCE: &str = "Meta Tags";

pub fn candidates(doc: &SourceDocument, _current: &FieldSet) -> Vec<Candidate> {
    let mut out = Vec::new();

    let blocks = doc.jsonld_blocks();
    if let Some(posting) = blocks.iter().find_map(|block| find_job_posting(block)) {
        if let Some(company) = organization_name(posting) {
            out.push(Candidate::new(Field::Company, company, 95, SCHEMA_SOURCE));
        }
        if let Some(title) = posting.get("title").and_then(Value::as_str) {
            out.push(Candidate::new(Field::JobTitle, title, 95, SCHEMA_SOURCE));
        }
        if let Some(location) = posting.get("jobLocation").and_then(resolve_job_location) {
            out.push(Candidate::new(Field::Location, location, 95, SCHEMA_SOURCE));
        }
        if let Some(description) = posting.get("description").and_then(Value::as_str) {
            out.push(Candidate::new(Field::Description, description, 95, SCHEMA_SOURCE));
        }
    }

    // Social metadata at 85. Emitted after the schema candidates, so the
    // strictly-greater upgrade rule keeps any 95-confidence match intact.
    if let Some(title) = doc.meta_property("og:title") {
        out.push(Candidate::new(Field::JobTitle, title, 85, META_SOURCE));
    }
    if let Some(site_name) = doc.meta_property("og:site_name") {
        out.push(Candidate::new(Field::Company, site_name, 85, META_SOURCE));
    }
    if let Some(description) = doc
        .meta_property("og:description")
        .or_else(|| doc.meta_name("description"))
    {
        out.push(Candidate::new(Field::Description, description, 85, META_SOURCE));
    }

    out
}

/// Locate a `JobPosting` object inside one JSON-LD block.
///
/// The block itself, a top-level array, or a `@graph` array are scanned in
/// order; the first typed match is returned. Anything else is no match.
fn find_job_posting(block: &Value) -> Option<&Value> {
    if is_job_posting(block) {
        return Some(block);
    }
    if let Some(items) = block.as_array() {
        return items.iter().find(|item| is_job_posting(item));
    }
    if let Some(graph) = block.get("@graph").and_then(Value::as_array) {
        return graph.iter().find(|item| is_job_posting(item));
    }
    None
}

fn is_job_posting(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == "JobPosting",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("JobPosting")),
        _ => false,
    }
}

/// `hiringOrganization` may be an object with a `name` or a bare string.
fn organization_name(posting: &Value) -> Option<&str> {
    let org = posting.get("hiringOrganization")?;
    org.get("name").and_then(Value::as_str).or_else(|| org.as_str())
}

/// Resolve `jobLocation` to a display string.
///
/// A plain string is used verbatim. A structured place resolves its
/// `address`: locality and region joined with ", ", either alone if only
/// one is present, else the country; otherwise no match. An array of
/// places uses its first element.
fn resolve_job_location(location: &Value) -> Option<String> {
    let place = match location.as_array() {
        Some(places) => places.first()?,
        None => location,
    };
    if let Some(text) = place.as_str() {
        return Some(text.to_string());
    }

    let address = place.get("address")?;
    if let Some(text) = address.as_str() {
        return Some(text.to_string());
    }

    let locality = address
        .get("addressLocality")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    let region = address
        .get("addressRegion")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");

    match (locality.is_empty(), region.is_empty()) {
        (false, false) => Some(format!("{locality}, {region}")),
        (false, true) => Some(locality.to_string()),
        (true, false) => Some(region.to_string()),
        (true, true) => address
            .get("addressCountry")
            .and_then(|country| {
                country
                    .get("name")
                    .and_then(Value::as_str)
                    .or_else(|| country.as_str())
            })
            .map(|c| c.to_string()),
    }
}
