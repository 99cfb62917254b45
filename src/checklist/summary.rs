use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{Checklist, Section};

/// Summary statistics for a checklist, built from the cached section totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub id: String,
    pub total_score: f64,
    pub max_possible_score: f64,
    pub completion_percentage: f64,
    pub section_count: usize,
    pub question_count: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ChecklistSummary {
    pub fn from_checklist(checklist: &Checklist) -> Self {
        let total_score: f64 = checklist.sections.iter().map(|s| s.score).sum();
        let max_possible_score: f64 = checklist.sections.iter().map(|s| s.max_score).sum();
        let completion_percentage = if max_possible_score > 0.0 {
            total_score / max_possible_score * 100.0
        } else {
            0.0
        };

        Self {
            id: checklist.id.clone(),
            total_score,
            max_possible_score,
            completion_percentage,
            section_count: checklist.sections.len(),
            question_count: checklist.sections.iter().map(count_questions).sum(),
            last_updated: checklist.updated_at,
        }
    }
}

/// Number of questions in a section: each top-level question plus its
/// direct sub-questions.
pub fn count_questions(section: &Section) -> usize {
    section
        .questions
        .iter()
        .map(|q| 1 + q.sub_questions().len())
        .sum()
}

/// Display bucket for a percentage: excellent, good, fair or poor.
pub fn score_class(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "excellent"
    } else if percentage >= 75.0 {
        "good"
    } else if percentage >= 60.0 {
        "fair"
    } else {
        "poor"
    }
}
