//! Layer 2 — semantic HTML (ceilings 80 / 75 / 70).
//!
//! Three passes over the element tree, in decreasing confidence:
//!
//! 1. Site-specific selector sequences for known job boards, matched by
//!    hostname substring, at 80 — the first matching site wins, and within
//!    it the first selector yielding non-empty visible text wins per field.
//! 2. Generic attribute/class conventions at 75 (70 for description).
//! 3. Elements carrying accessibility labels at 70, keyed on label words.
//!
//! Invalid selectors are treated as no match per candidate, never an error.

use crate::detect::tables::{
    GENERIC_COMPANY_SELECTORS, GENERIC_DESCRIPTION_SELECTORS, GENERIC_LOCATION_SELECTORS,
    GENERIC_TITLE_SELECTORS, SITE_SELECTORS,
};
use crate::detect::{Candidate, Field, FieldSet};
use crate::document::{element_text, SourceDocument};

const CONVENTION_SOURCE: &str = "HTML Conventions";
const ARIA_SOURCE: &str = "ARIA Label";

pub fn candidates(doc: &SourceDocument, current: &FieldSet) -> Vec<Candidate> {
    let mut out = Vec::new();

    site_candidates(doc, current, &mut out);
    generic_candidates(doc, current, &mut out);
    aria_candidates(doc, current, &mut out);

    out
}

/// Site-specific selectors at 80 for the first matching known site.
fn site_candidates(doc: &SourceDocument, current: &FieldSet, out: &mut Vec<Candidate>) {
    let Some(host) = doc.hostname() else {
        return;
    };
    let Some(site) = SITE_SELECTORS.iter().find(|s| host.contains(s.host)) else {
        return;
    };
    tracing::debug!(site = site.host, "known job site matched");
    let source = format!("Site Selector ({})", site.host);

    let per_field: [(Field, &[&str]); 4] = [
        (Field::Company, site.company),
        (Field::JobTitle, site.title),
        (Field::Location, site.location),
        (Field::Description, site.description),
    ];
    for (field, selectors) in per_field {
        if !current.below(field, 80) {
            continue;
        }
        if let Some(text) = first_selector_text(doc, selectors) {
            out.push(Candidate::new(field, text, 80, source.clone()));
        }
    }
}

/// Generic attribute/class conventions: 75 for company/title/location,
/// 70 for description.
fn generic_candidates(doc: &SourceDocument, current: &FieldSet, out: &mut Vec<Candidate>) {
    let per_field: [(Field, &[&str], u8); 4] = [
        (Field::Company, GENERIC_COMPANY_SELECTORS, 75),
        (Field::JobTitle, GENERIC_TITLE_SELECTORS, 75),
        (Field::Location, GENERIC_LOCATION_SELECTORS, 75),
        (Field::Description, GENERIC_DESCRIPTION_SELECTORS, 70),
    ];
    for (field, selectors, ceiling) in per_field {
        if !current.below(field, ceiling) {
            continue;
        }
        if let Some(text) = first_selector_text(doc, selectors) {
            out.push(Candidate::new(field, text, ceiling, CONVENTION_SOURCE));
        }
    }
}

/// Accessibility-label scan at 70.
///
/// The label routes the element to a field; the value is the element's own
/// visible text, which must be non-empty.
fn aria_candidates(doc: &SourceDocument, current: &FieldSet, out: &mut Vec<Candidate>) {
    let mut seen = [false; 3];
    for el in doc.select("[aria-label]") {
        let Some(label) = el.value().attr("aria-label") else {
            continue;
        };
        let label = label.to_lowercase();
        let field = if label.contains("company") || label.contains("employer") {
            Field::Company
        } else if label.contains("job") || label.contains("title") || label.contains("position") {
            Field::JobTitle
        } else if label.contains("location") {
            Field::Location
        } else {
            continue;
        };

        let slot = match field {
            Field::Company => 0,
            Field::JobTitle => 1,
            _ => 2,
        };
        if seen[slot] || !current.below(field, 70) {
            continue;
        }
        let text = element_text(&el);
        if text.is_empty() {
            continue;
        }
        seen[slot] = true;
        out.push(Candidate::new(field, text, 70, ARIA_SOURCE));
    }
}

/// First selector in the sequence yielding non-empty visible text.
fn first_selector_text(doc: &SourceDocument, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|selector| doc.select_first_text(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str, url: Option<&str>) -> Vec<Candidate> {
        let doc = SourceDocument::parse(html, url);
        candidates(&doc, &FieldSet::default())
    }

    fn find(found: &[Candidate], field: Field) -> Option<&Candidate> {
        found.iter().find(|c| c.field == field)
    }

    #[test]
    fn known_site_selectors_fire_at_80() {
        let html = r#"
        <html><body>
            <h1 data-testid="jobsearch-JobInfoHeader-title">Backend Engineer</h1>
            <div data-testid="inlineHeader-companyName">Acme Corp</div>
            <div data-testid="job-location">Austin, TX</div>
            <div id="jobDescriptionText">Do backend things.</div>
        </body></html>
        "#;
        let found = run(html, Some("https://www.indeed.com/viewjob?jk=abc"));
        for field in Field::ALL {
            let c = find(&found, field).unwrap();
            assert_eq!(c.confidence, 80);
            assert_eq!(c.source, "Site Selector (indeed.com)");
        }
        assert_eq!(find(&found, Field::JobTitle).unwrap().value, "Backend Engineer");
    }

    #[test]
    fn first_selector_with_text_wins_within_site() {
        let html = r#"
        <html><body>
            <a class="topcard__org-name-link"></a>
            <a class="topcard__flavor a"> </a>
            <div class="top-card-layout__company-url">Globex</div>
        </body></html>
        "#;
        let found = run(html, Some("https://linkedin.com/jobs/view/1"));
        assert_eq!(find(&found, Field::Company).unwrap().value, "Globex");
    }

    #[test]
    fn unknown_host_skips_site_pass_but_generic_fires() {
        let html = r#"
        <html><body>
            <span class="company-name">Initech</span>
            <h2 class="job-title">Release Manager</h2>
            <div class="job-location">Portland, OR</div>
            <section class="job-description">Ship the releases.</section>
        </body></html>
        "#;
        let found = run(html, Some("https://smallboard.example.org/roles/1"));
        assert_eq!(find(&found, Field::Company).unwrap().confidence, 75);
        assert_eq!(find(&found, Field::JobTitle).unwrap().confidence, 75);
        assert_eq!(find(&found, Field::Location).unwrap().confidence, 75);
        let desc = find(&found, Field::Description).unwrap();
        assert_eq!(desc.confidence, 70);
        assert_eq!(desc.source, "HTML Conventions");
    }

    #[test]
    fn aria_labels_route_to_fields_at_70() {
        let html = r#"
        <html><body>
            <span aria-label="Employer">Hooli</span>
            <span aria-label="Position name">Staff Designer</span>
            <span aria-label="Office location">Denver, CO</span>
            <span aria-label="location">Ignored duplicate</span>
        </body></html>
        "#;
        let found = run(html, None);
        let company = find(&found, Field::Company).unwrap();
        assert_eq!((company.value.as_str(), company.confidence), ("Hooli", 70));
        assert_eq!(find(&found, Field::JobTitle).unwrap().value, "Staff Designer");
        // First labeled element wins; the duplicate is not emitted.
        assert_eq!(find(&found, Field::Location).unwrap().value, "Denver, CO");
        assert_eq!(found.iter().filter(|c| c.field == Field::Location).count(), 1);
    }

    #[test]
    fn aria_element_without_text_is_no_match() {
        let html = r#"<html><body><span aria-label="company"></span></body></html>"#;
        assert!(run(html, None).is_empty());
    }

    #[test]
    fn site_pass_skips_fields_already_at_ceiling() {
        let html = r#"
        <html><body><div data-testid="inlineHeader-companyName">Acme</div></body></html>
        "#;
        let doc = SourceDocument::parse(html, Some("https://indeed.com/viewjob"));
        let mut current = FieldSet::default();
        current.apply(Candidate::new(Field::Company, "Schema Corp", 95, "JSON-LD Schema"));
        let found = candidates(&doc, &current);
        assert!(find(&found, Field::Company).is_none());
    }
}
