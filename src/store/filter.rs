use serde::Serialize;

use super::types::ChecklistStore;
use crate::checklist::{Checklist, ChecklistSummary, Question, QuestionType, StandardQuestion};

/// Field filter over stored checklists. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistFilter {
    pub health_program: Option<String>,
    pub organizational_level: Option<String>,
    pub department: Option<String>,
}

impl ChecklistFilter {
    pub fn is_empty(&self) -> bool {
        self.health_program.is_none()
            && self.organizational_level.is_none()
            && self.department.is_none()
    }

    pub fn matches(&self, checklist: &Checklist) -> bool {
        fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
            wanted.as_deref().map_or(true, |w| w == actual)
        }

        field_matches(&self.health_program, &checklist.health_program)
            && field_matches(&self.organizational_level, &checklist.organizational_level)
            && field_matches(&self.department, &checklist.department)
    }
}

/// Stored results of one department at one organizational level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsGrouping {
    pub department: String,
    pub organizational_level: String,
    pub sections: Vec<SectionResult>,
    /// Summary of the first checklist seen for this grouping.
    pub summary: ChecklistSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResult {
    pub section_id: String,
    pub section_title: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub question_results: Vec<QuestionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub question_title: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_question_results: Vec<QuestionResult>,
}

impl QuestionResult {
    fn from_question(question: &Question) -> Self {
        match question {
            Question::Standard(q) => Self::from_standard(q),
            Question::DataControl(q) => Self {
                question_id: q.id.clone(),
                question_title: q.title.clone(),
                score: q.score,
                max_score: q.max_score,
                question_type: QuestionType::DataControl,
                sub_question_results: Vec::new(),
            },
        }
    }

    fn from_standard(question: &StandardQuestion) -> Self {
        Self {
            question_id: question.id.clone(),
            question_title: question.title.clone(),
            score: question.score,
            max_score: question.max_score,
            question_type: QuestionType::Standard,
            sub_question_results: question
                .sub_questions
                .iter()
                .map(Self::from_standard)
                .collect(),
        }
    }
}

/// Group the filtered checklists by (department, organizational level),
/// in order of first appearance. Sections of every checklist in a group are
/// concatenated.
pub fn group_results(store: &ChecklistStore, filter: &ChecklistFilter) -> Vec<ResultsGrouping> {
    let mut groupings: Vec<ResultsGrouping> = Vec::new();

    for checklist in store.filtered(filter) {
        let index = match groupings.iter().position(|g| {
            g.department == checklist.department
                && g.organizational_level == checklist.organizational_level
        }) {
            Some(i) => i,
            None => {
                groupings.push(ResultsGrouping {
                    department: checklist.department.clone(),
                    organizational_level: checklist.organizational_level.clone(),
                    sections: Vec::new(),
                    summary: ChecklistSummary::from_checklist(checklist),
                });
                groupings.len() - 1
            }
        };

        groupings[index]
            .sections
            .extend(checklist.sections.iter().map(|section| SectionResult {
                section_id: section.id.clone(),
                section_title: section.title.clone(),
                score: section.score,
                max_score: section.max_score,
                percentage: if section.max_score > 0.0 {
                    section.score / section.max_score * 100.0
                } else {
                    0.0
                },
                question_results: section
                    .questions
                    .iter()
                    .map(QuestionResult::from_question)
                    .collect(),
            }));
    }

    groupings
}

/// Mean completion percentage across groupings, rounded to a whole number.
pub fn average_completion(groupings: &[ResultsGrouping]) -> f64 {
    if groupings.is_empty() {
        return 0.0;
    }
    let total: f64 = groupings
        .iter()
        .map(|g| g.summary.completion_percentage)
        .sum();
    (total / groupings.len() as f64 + 0.5).floor()
}
