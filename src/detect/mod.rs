//! Layered job-posting field detector.
//!
//! Four ordered layers run over a [`SourceDocument`], each attempting to
//! raise confidence for company, job title, location and description:
//!
//! 1. **Structured data** — JSON-LD `JobPosting` (95), social metadata (85)
//! 2. **Semantic HTML** — site selectors (80), generic conventions (75/70),
//!    accessibility labels (70)
//! 3. **Text analysis** — regex and heading heuristics over visible text (60)
//! 4. **Fallback** — page title split and hostname derivation (40/35)
//!
//! Each layer is a pure function `(document, current results) -> candidates`;
//! the candidates fold into a [`FieldSet`] through one shared update
//! primitive that rejects empty values, collapses whitespace and upgrades a
//! field only when the new confidence is strictly greater. Confidence is
//! therefore monotonic, and the first layer to reach a given ceiling wins
//! ties. Detection never fails: a field nothing matched comes back as an
//! empty value at confidence 0.

pub mod fallback;
pub mod semantic;
pub mod structured;
pub mod tables;
pub mod text_patterns;

use crate::document::SourceDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four logical fields of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Company,
    JobTitle,
    Location,
    Description,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Company,
        Field::JobTitle,
        Field::Location,
        Field::Description,
    ];

    /// Map key used in [`DetectionOutput`].
    pub fn key(self) -> &'static str {
        match self {
            Field::Company => "company",
            Field::JobTitle => "jobTitle",
            Field::Location => "location",
            Field::Description => "description",
        }
    }
}

/// Current best value for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldResult {
    pub value: String,
    /// 0–100; 0 means not detected.
    pub confidence: u8,
    /// Label of the layer/pattern that produced the value.
    pub source: String,
}

impl FieldResult {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// UI indicator band for a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
    NotDetected,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            70.. => ConfidenceBand::High,
            40..=69 => ConfidenceBand::Medium,
            1..=39 => ConfidenceBand::Low,
            0 => ConfidenceBand::NotDetected,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
            ConfidenceBand::NotDetected => "none",
        }
    }
}

/// One (value, confidence, source) triple proposed by a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub field: Field,
    pub value: String,
    pub confidence: u8,
    pub source: String,
}

impl Candidate {
    pub fn new(
        field: Field,
        value: impl Into<String>,
        confidence: u8,
        source: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            confidence,
            source: source.into(),
        }
    }
}

/// Collapse internal whitespace runs to single spaces and trim.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mutable accumulator for the four fields during one detection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    company: FieldResult,
    job_title: FieldResult,
    location: FieldResult,
    description: FieldResult,
}

impl FieldSet {
    pub fn get(&self, field: Field) -> &FieldResult {
        match field {
            Field::Company => &self.company,
            Field::JobTitle => &self.job_title,
            Field::Location => &self.location,
            Field::Description => &self.description,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut FieldResult {
        match field {
            Field::Company => &mut self.company,
            Field::JobTitle => &mut self.job_title,
            Field::Location => &mut self.location,
            Field::Description => &mut self.description,
        }
    }

    pub fn confidence(&self, field: Field) -> u8 {
        self.get(field).confidence
    }

    /// True when the field has not yet reached `ceiling`.
    pub fn below(&self, field: Field, ceiling: u8) -> bool {
        self.confidence(field) < ceiling
    }

    /// The shared update primitive.
    ///
    /// Rejects empty/whitespace-only values, normalizes whitespace, and
    /// replaces the current result only if the candidate confidence is
    /// strictly greater. Returns whether the field was upgraded.
    pub fn apply(&mut self, candidate: Candidate) -> bool {
        let value = normalize_whitespace(&candidate.value);
        if value.is_empty() {
            return false;
        }
        let slot = self.get_mut(candidate.field);
        if candidate.confidence <= slot.confidence {
            return false;
        }
        tracing::debug!(
            field = candidate.field.key(),
            confidence = candidate.confidence,
            source = %candidate.source,
            "field upgraded"
        );
        *slot = FieldResult {
            value,
            confidence: candidate.confidence,
            source: candidate.source,
        };
        true
    }
}

/// Final detection result: parallel maps keyed by field name.
///
/// Every field key is always present; an undetected field carries an empty
/// value, confidence 0 and an empty source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionOutput {
    pub values: BTreeMap<String, String>,
    pub confidences: BTreeMap<String, u8>,
    pub sources: BTreeMap<String, String>,
}

impl DetectionOutput {
    fn from_fields(fields: &FieldSet) -> Self {
        let mut out = DetectionOutput::default();
        for field in Field::ALL {
            let result = fields.get(field);
            out.values.insert(field.key().to_string(), result.value.clone());
            out.confidences.insert(field.key().to_string(), result.confidence);
            out.sources.insert(field.key().to_string(), result.source.clone());
        }
        out
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field.key()).map(String::as_str).unwrap_or("")
    }

    pub fn confidence(&self, field: Field) -> u8 {
        self.confidences.get(field.key()).copied().unwrap_or(0)
    }

    pub fn source(&self, field: Field) -> &str {
        self.sources.get(field.key()).map(String::as_str).unwrap_or("")
    }

    pub fn band(&self, field: Field) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence(field))
    }
}

/// Tunable thresholds for the text-analysis heading heuristics.
///
/// The bounds mirror how job pages typically style company bylines (mid-size
/// headings) versus titles (large headings); both checks use exclusive
/// comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorTuning {
    /// Company heading heuristic: font size must be strictly above this.
    pub company_heading_min_px: f32,
    /// Company heading heuristic: font size must be strictly below this.
    pub company_heading_max_px: f32,
    /// Title h2/h3 heuristic: font size must be strictly above this.
    pub title_heading_min_px: f32,
}

impl Default for DetectorTuning {
    fn default() -> Self {
        Self {
            company_heading_min_px: 14.0,
            company_heading_max_px: 24.0,
            title_heading_min_px: 18.0,
        }
    }
}

/// The four-layer field detector.
///
/// Stateless across calls and re-entrant; each call allocates a fresh
/// accumulator. Reads only — the document is never mutated.
#[derive(Debug, Clone, Default)]
pub struct FieldDetector {
    tuning: DetectorTuning,
}

impl FieldDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: DetectorTuning) -> Self {
        Self { tuning }
    }

    /// Run all four layers over the document and resolve the fields.
    ///
    /// Never fails; extraction problems inside a layer count as "no match"
    /// for that sub-step and detection continues.
    pub fn detect(&self, doc: &SourceDocument) -> DetectionOutput {
        let mut fields = FieldSet::default();

        for candidate in structured::candidates(doc, &fields) {
            fields.apply(candidate);
        }
        for candidate in semantic::candidates(doc, &fields) {
            fields.apply(candidate);
        }
        for candidate in text_patterns::candidates(doc, &fields, &self.tuning) {
            fields.apply(candidate);
        }
        for candidate in fallback::candidates(doc, &fields) {
            fields.apply(candidate);
        }

        DetectionOutput::from_fields(&fields)
    }
}
