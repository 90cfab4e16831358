//! Layer 4 — fallback (ceilings 40 / 35).
//!
//! Last-resort derivations for fields still below 40: the page title split
//! at the first `-` or `|` for the job title, the first `h1` verbatim below
//! that, and a company name derived from the hostname.

use crate::detect::tables::HOSTNAME_NOISE_LABELS;
use crate::detect::{Candidate, Field, FieldSet};
use crate::document::SourceDocument;

pub fn candidates(doc: &SourceDocument, current: &FieldSet) -> Vec<Candidate> {
    let mut out = Vec::new();

    if current.below(Field::JobTitle, 40) {
        if let Some(title) = doc.page_title() {
            let head = title.split(['-', '|']).next().unwrap_or("").trim();
            if !head.is_empty() {
                out.push(Candidate::new(Field::JobTitle, head, 40, "Page Title"));
            }
        }
        if let Some(heading) = doc.select_first_text("h1") {
            out.push(Candidate::new(Field::JobTitle, heading, 35, "First Heading"));
        }
    }

    if current.below(Field::Company, 40) {
        if let Some(host) = doc.hostname() {
            if let Some(name) = company_from_hostname(&host) {
                out.push(Candidate::new(Field::Company, name, 35, "Hostname"));
            }
        }
    }

    out
}

/// Derive a company name from the hostname.
///
/// Leading `www.` and the usual job-board subdomain labels are stripped, so
/// `jobs.acme.com` derives `Acme`; the first remaining label is capitalized.
fn company_from_hostname(host: &str) -> Option<String> {
    let mut labels: Vec<&str> = host.split('.').collect();
    while labels.len() > 1
        && HOSTNAME_NOISE_LABELS.contains(&labels[0].to_ascii_lowercase().as_str())
    {
        labels.remove(0);
    }
    let label = labels.first()?.trim();
    if label.is_empty() {
        return None;
    }
    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}
