//! Layer 3 — text analysis (ceiling 60).
//!
//! Regex and heading heuristics over visible text, applied only to fields
//! still below 60. Each field tries its sub-patterns in a fixed order and
//! the first success wins; sub-patterns are never merged.

use crate::detect::tables::{
    JOB_TITLE_KEYWORDS, LEGAL_SUFFIXES, REMOTE_PHRASES, SENTENCE_STOPWORDS, US_STATES,
};
use crate::detect::{Candidate, DetectorTuning, Field, FieldSet};
use crate::document::SourceDocument;
use regex::Regex;
use std::sync::OnceLock;

const CEILING: u8 = 60;

pub fn candidates(
    doc: &SourceDocument,
    current: &FieldSet,
    tuning: &DetectorTuning,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    let body = doc.body_text();

    if current.below(Field::Company, CEILING) {
        if let Some((value, source)) = company(doc, &body, tuning) {
            out.push(Candidate::new(Field::Company, value, CEILING, source));
        }
    }
    if current.below(Field::JobTitle, CEILING) {
        if let Some((value, source)) = job_title(doc, tuning) {
            out.push(Candidate::new(Field::JobTitle, value, CEILING, source));
        }
    }
    if current.below(Field::Location, CEILING) {
        if let Some((value, source)) = location(&body) {
            out.push(Candidate::new(Field::Location, value, CEILING, source));
        }
    }

    out
}

// ── Company ──────────────────────────────────────────────────────────────────

fn company(
    doc: &SourceDocument,
    body: &str,
    tuning: &DetectorTuning,
) -> Option<(String, &'static str)> {
    if let Some(name) = company_mention(body) {
        return Some((name, "Text Pattern (Company Mention)"));
    }
    if let Some(name) = legal_suffix_span(body) {
        return Some((name, "Text Pattern (Legal Suffix)"));
    }
    if let Some(name) = company_heading(doc, tuning) {
        return Some((name, "Text Pattern (Heading)"));
    }
    None
}

/// "at Acme" / "@ Acme" phrases: a capitalized span of 3–50 chars after the
/// marker, cut at the first non-capitalized word or punctuation.
fn company_mention(body: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?:\bat\s+|@\s*)([A-Z][A-Za-z0-9&'-]*(?:\s+[A-Z][A-Za-z0-9&'-]*){0,4})")
            .expect("company mention regex is valid")
    });
    re.captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| (3..=50).contains(&name.len()))
}

/// Capitalized span immediately followed by a legal-entity suffix.
fn legal_suffix_span(body: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        let suffixes = LEGAL_SUFFIXES.join("|");
        Regex::new(&format!(
            r"\b([A-Z][A-Za-z0-9&'-]*(?:\s+[A-Z][A-Za-z0-9&'-]*){{0,4}}\s+(?:{suffixes})\b\.?)"
        ))
        .expect("legal suffix regex is valid")
    });
    re.captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| (3..=50).contains(&name.len()))
}

/// Mid-size h1–h3 headings whose text reads as a company name.
fn company_heading(doc: &SourceDocument, tuning: &DetectorTuning) -> Option<String> {
    doc.headings(&[1, 2, 3])
        .into_iter()
        .find(|h| {
            h.font_px > tuning.company_heading_min_px
                && h.font_px < tuning.company_heading_max_px
                && looks_like_company_name(&h.text)
        })
        .map(|h| h.text)
}

/// A heading looks like a company name when it carries a legal-entity
/// suffix, or starts with a capital letter and is not a stopword-bearing
/// sentence.
fn looks_like_company_name(text: &str) -> bool {
    let has_suffix = text
        .split_whitespace()
        .any(|word| LEGAL_SUFFIXES.contains(&word.trim_end_matches('.')));
    if has_suffix {
        return true;
    }
    if !text.chars().next().is_some_and(|c| c.is_uppercase()) {
        return false;
    }
    !text.split_whitespace().any(|word| {
        let word = word.to_lowercase();
        SENTENCE_STOPWORDS.contains(&word.as_str())
    })
}

// ── Job title ────────────────────────────────────────────────────────────────

fn job_title(doc: &SourceDocument, tuning: &DetectorTuning) -> Option<(String, &'static str)> {
    let has_keyword = |text: &str| {
        let lower = text.to_lowercase();
        JOB_TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
    };

    // All h1s first, any size.
    if let Some(h) = doc
        .headings(&[1])
        .into_iter()
        .find(|h| has_keyword(&h.text))
    {
        return Some((h.text, "Text Pattern (Heading Keyword)"));
    }
    // Then large h2/h3s.
    doc.headings(&[2, 3])
        .into_iter()
        .find(|h| h.font_px > tuning.title_heading_min_px && has_keyword(&h.text))
        .map(|h| (h.text, "Text Pattern (Heading Keyword)"))
}

// ── Location ─────────────────────────────────────────────────────────────────

fn location(body: &str) -> Option<(String, &'static str)> {
    if let Some(loc) = city_state(body) {
        return Some((loc, "Text Pattern (City, State)"));
    }
    if remote_mention(body) {
        return Some(("Remote".to_string(), "Text Pattern (Remote)"));
    }
    if let Some(loc) = location_label(body) {
        return Some((loc, "Text Pattern (Location Label)"));
    }
    state_name(body).map(|loc| (loc, "Text Pattern (State Name)"))
}

/// "City, ST": capitalized word sequence, comma, two-letter uppercase code.
fn city_state(body: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\b([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*),\s*([A-Z]{2})\b")
            .expect("city/state regex is valid")
    });
    re.captures(body).map(|caps| format!("{}, {}", &caps[1], &caps[2]))
}

fn remote_mention(body: &str) -> bool {
    let lower = body.to_lowercase();
    REMOTE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// "Location:" label followed by a capitalized phrase, optionally ending in
/// a two-letter state code.
fn location_label(body: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i:location)\s*:\s*([A-Z][A-Za-z'-]*(?:\s+[A-Z][A-Za-z'-]*)*(?:,\s*[A-Z]{2})?)")
            .expect("location label regex is valid")
    });
    re.captures(body).map(|caps| caps[1].trim().to_string())
}

/// Last resort: a known state name anywhere in the text, list order wins.
fn state_name(body: &str) -> Option<String> {
    let lower = body.to_lowercase();
    US_STATES
        .iter()
        .find(|state| lower.contains(&state.to_lowercase()))
        .map(|state| state.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Vec<Candidate> {
        let doc = SourceDocument::parse(html, None);
        candidates(&doc, &FieldSet::default(), &DetectorTuning::default())
    }

    fn find(found: &[Candidate], field: Field) -> Option<&Candidate> {
        found.iter().find(|c| c.field == field)
    }

    #[test]
    fn legal_suffix_and_city_state_from_plain_body() {
        let html = r#"
        <html><body>
            <p>Join Acme Inc as a Senior Engineer in Austin, TX</p>
        </body></html>
        "#;
        let found = run(html);
        let company = find(&found, Field::Company).unwrap();
        assert!(company.value.contains("Acme Inc"), "got {:?}", company.value);
        assert_eq!(company.confidence, 60);
        assert_eq!(company.source, "Text Pattern (Legal Suffix)");
        let location = find(&found, Field::Location).unwrap();
        assert_eq!(location.value, "Austin, TX");
        assert_eq!(location.confidence, 60);
    }

    #[test]
    fn company_mention_after_at() {
        assert_eq!(
            company_mention("Grow your career at Globex Dynamics today"),
            Some("Globex Dynamics".to_string())
        );
        assert_eq!(company_mention("nothing here"), None);
        // Too short after trimming.
        assert_eq!(company_mention("work at Go now"), None);
    }

    #[test]
    fn company_mention_outranks_legal_suffix() {
        let html = r#"<html><body>
            <p>Engineering at Hooli. Formerly Pied Piper Inc.</p>
        </body></html>"#;
        let found = run(html);
        let company = find(&found, Field::Company).unwrap();
        assert_eq!(company.source, "Text Pattern (Company Mention)");
        assert_eq!(company.value, "Hooli");
    }

    #[test]
    fn company_heading_respects_font_bounds() {
        // 18px h2 is inside (14, 24); default h1 (32px) is not.
        let html = r#"<html><body>
            <h1>Opportunity Knocks</h1>
            <h2 style="font-size: 18px">Globex</h2>
        </body></html>"#;
        let found = run(html);
        let company = find(&found, Field::Company).unwrap();
        assert_eq!(company.value, "Globex");
        assert_eq!(company.source, "Text Pattern (Heading)");
    }

    #[test]
    fn stopword_sentence_heading_is_rejected() {
        let html = r#"<html><body>
            <h3>This is the best team</h3>
        </body></html>"#;
        // h3 defaults to 18.72px, inside the band, but the text is a sentence.
        assert!(find(&run(html), Field::Company).is_none());
    }

    #[test]
    fn looks_like_company_name_rules() {
        assert!(looks_like_company_name("Acme Inc."));
        assert!(looks_like_company_name("Globex"));
        assert!(!looks_like_company_name("the team"));
        assert!(!looks_like_company_name("Where the magic happens"));
        assert!(!looks_like_company_name("lowercase name"));
    }

    #[test]
    fn h1_keyword_wins_over_sized_h2() {
        let html = r#"<html><body>
            <h2 style="font-size: 22px">Principal Architect</h2>
            <h1>Senior Developer</h1>
        </body></html>"#;
        let found = run(html);
        assert_eq!(find(&found, Field::JobTitle).unwrap().value, "Senior Developer");
    }

    #[test]
    fn small_h2_keyword_is_ignored() {
        let html = r#"<html><body>
            <h2 style="font-size: 14px">Junior Analyst</h2>
        </body></html>"#;
        assert!(find(&run(html), Field::JobTitle).is_none());
    }

    #[test]
    fn sized_h3_keyword_matches_when_no_h1() {
        let html = r#"<html><body>
            <h1>Welcome aboard</h1>
            <h3 style="font-size: 20px">Product Designer</h3>
        </body></html>"#;
        let found = run(html);
        assert_eq!(find(&found, Field::JobTitle).unwrap().value, "Product Designer");
    }

    #[test]
    fn remote_phrases_resolve_to_literal_remote() {
        for body in ["Fully remote role", "You can Work From Home", "WFH friendly"] {
            let html = format!("<html><body><p>{body}</p></body></html>");
            let found = run(&html);
            assert_eq!(find(&found, Field::Location).unwrap().value, "Remote");
        }
    }

    #[test]
    fn location_label_with_and_without_state_code() {
        assert_eq!(
            location_label("LOCATION: Austin, TX and more"),
            Some("Austin, TX".to_string())
        );
        assert_eq!(
            location_label("Location: New York City office"),
            // Capitalized words only; "office" is lowercase and excluded.
            Some("New York City".to_string())
        );
        assert_eq!(location_label("no label here"), None);
    }

    #[test]
    fn state_name_list_order_wins() {
        let html = r#"<html><body>
            <p>offices across michigan and california</p>
        </body></html>"#;
        let found = run(html);
        // California precedes Michigan in the table.
        assert_eq!(find(&found, Field::Location).unwrap().value, "California");
        assert_eq!(
            find(&found, Field::Location).unwrap().source,
            "Text Pattern (State Name)"
        );
    }

    #[test]
    fn fields_at_or_above_ceiling_are_skipped() {
        let html = r#"<html><body><p>Join Acme Inc in Austin, TX</p></body></html>"#;
        let doc = SourceDocument::parse(html, None);
        let mut current = FieldSet::default();
        current.apply(Candidate::new(Field::Company, "Better Corp", 80, "x"));
        current.apply(Candidate::new(Field::Location, "Boston, MA", 60, "x"));
        let found = candidates(&doc, &current, &DetectorTuning::default());
        assert!(find(&found, Field::Company).is_none());
        assert!(find(&found, Field::Location).is_none());
    }
}
