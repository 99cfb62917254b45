use serde::Serialize;
use std::collections::HashSet;

use super::types::{Checklist, Section, StandardQuestion};

/// Outcome of structural checklist validation.
///
/// Errors block a save; warnings are informational.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate checklist structure before it is persisted.
/// Collects every problem rather than stopping at the first.
///
/// Only the cached section `score`/`max_score` fields are inspected; run the
/// scoring engine first if they should reflect the current questions.
pub fn validate_checklist(checklist: &Checklist) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if is_blank(&checklist.id) {
        errors.push("Checklist ID is required".to_string());
    }
    if is_blank(&checklist.health_program) {
        errors.push("Health program is required".to_string());
    }
    if is_blank(&checklist.organizational_level) {
        errors.push("Organizational level is required".to_string());
    }
    if is_blank(&checklist.department) {
        errors.push("Department is required".to_string());
    }

    if checklist.sections.is_empty() {
        errors.push("At least one section is required".to_string());
    }

    let mut section_ids = HashSet::new();
    for (i, section) in checklist.sections.iter().enumerate() {
        let n = i + 1;
        if is_blank(&section.id) {
            errors.push(format!("Section {}: ID is required", n));
        } else if !section_ids.insert(section.id.as_str()) {
            warnings.push(format!("Section {}: Duplicate section ID '{}'", n, section.id));
        }
        if is_blank(&section.title) {
            errors.push(format!("Section {}: Title is required", n));
        }
        if section.score < 0.0 {
            errors.push(format!("Section {}: Score cannot be negative", n));
        }
        if section.max_score <= 0.0 {
            errors.push(format!("Section {}: Max score must be positive", n));
        }
        if section.score > section.max_score {
            warnings.push(format!("Section {}: Score exceeds max score", n));
        }

        if section.questions.is_empty() {
            warnings.push(format!("Section {}: No questions found", n));
        }
        for id in duplicate_question_ids(section) {
            warnings.push(format!("Section {}: Duplicate question ID '{}'", n, id));
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Question ids that occur more than once in a section, sub-questions included.
fn duplicate_question_ids(section: &Section) -> Vec<&str> {
    fn walk<'a>(
        subs: &'a [StandardQuestion],
        seen: &mut HashSet<&'a str>,
        dupes: &mut Vec<&'a str>,
    ) {
        for sub in subs {
            let id = sub.id.as_str();
            if !seen.insert(id) && !dupes.contains(&id) {
                dupes.push(id);
            }
            walk(&sub.sub_questions, seen, dupes);
        }
    }

    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for question in &section.questions {
        let id = question.id();
        if !seen.insert(id) && !dupes.contains(&id) {
            dupes.push(id);
        }
        walk(question.sub_questions(), &mut seen, &mut dupes);
    }
    dupes
}
