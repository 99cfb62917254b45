//! Direct numeric scoring: each question carries its own `score`.

use serde::Serialize;

use super::config::ScoringConfig;
use crate::checklist::{Checklist, Question, QuestionType, Section, StandardQuestion};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCalculation {
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScore {
    pub question_id: String,
    pub question_title: String,
    pub question_type: QuestionType,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_question_scores: Vec<QuestionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScore {
    pub section_id: String,
    pub section_title: String,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub question_scores: Vec<QuestionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistScores {
    pub overall: ScoreCalculation,
    pub sections: Vec<SectionScore>,
}

impl ChecklistScores {
    /// Sum section totals into an overall result.
    pub(crate) fn from_sections(sections: Vec<SectionScore>, config: &ScoringConfig) -> Self {
        let total_score = config.round_score(sections.iter().map(|s| s.total_score).sum());
        let max_score = config.round_score(sections.iter().map(|s| s.max_score).sum());
        Self {
            overall: ScoreCalculation {
                total_score,
                max_score,
                percentage: config.percentage(total_score, max_score),
            },
            sections,
        }
    }
}

impl SectionScore {
    fn from_questions(
        section: &Section,
        question_scores: Vec<QuestionScore>,
        config: &ScoringConfig,
    ) -> Self {
        let total_score = config.round_score(question_scores.iter().map(|q| q.total_score).sum());
        let max_score = config.round_score(question_scores.iter().map(|q| q.max_score).sum());
        Self {
            section_id: section.id.clone(),
            section_title: section.title.clone(),
            total_score,
            max_score,
            percentage: config.percentage(total_score, max_score),
            question_scores,
        }
    }
}

/// Maximum score of a single question.
///
/// `default_max_score`, weighted by question type when weighting is enabled.
/// A standard question adds one `default_max_score` per direct sub-question
/// (scaled by `sub_question_multiplier` when weighting is enabled).
pub fn question_max_score(question: &Question, config: &ScoringConfig) -> f64 {
    match question {
        Question::Standard(q) => standard_max_score(q, config),
        Question::DataControl(_) => {
            config.round_score(base_max_score(QuestionType::DataControl, config))
        }
    }
}

fn base_max_score(question_type: QuestionType, config: &ScoringConfig) -> f64 {
    if !config.enable_weighting {
        return config.default_max_score;
    }
    let weight = match question_type {
        QuestionType::Standard => config.weights.standard_question,
        QuestionType::DataControl => config.weights.data_control_question,
    };
    config.default_max_score * weight
}

fn standard_max_score(question: &StandardQuestion, config: &ScoringConfig) -> f64 {
    let per_sub = if config.enable_weighting {
        config.default_max_score * config.weights.sub_question_multiplier
    } else {
        config.default_max_score
    };
    let subs = per_sub * question.sub_questions.len() as f64;
    config.round_score(base_max_score(QuestionType::Standard, config) + subs)
}

/// Score a single question.
///
/// The total is the question's own score plus every sub-question's total,
/// while the maximum comes from [`question_max_score`], which already counts
/// one `default_max_score` per sub-question.
// NOTE: if a parent's stored score already includes its sub-question points
// they are counted twice. Kept as-is until the intended semantics are settled.
pub fn question_score(question: &Question, config: &ScoringConfig) -> QuestionScore {
    match question {
        Question::Standard(q) => standard_score(q, config),
        Question::DataControl(q) => {
            let total_score = config.round_score(q.score);
            let max_score = question_max_score(question, config);
            QuestionScore {
                question_id: q.id.clone(),
                question_title: q.title.clone(),
                question_type: QuestionType::DataControl,
                total_score,
                max_score,
                percentage: config.percentage(total_score, max_score),
                sub_question_scores: Vec::new(),
            }
        }
    }
}

fn standard_score(question: &StandardQuestion, config: &ScoringConfig) -> QuestionScore {
    let sub_question_scores: Vec<QuestionScore> = question
        .sub_questions
        .iter()
        .map(|sub| standard_score(sub, config))
        .collect();
    let sub_total: f64 = sub_question_scores.iter().map(|s| s.total_score).sum();

    let total_score = config.round_score(question.score + sub_total);
    let max_score = standard_max_score(question, config);
    QuestionScore {
        question_id: question.id.clone(),
        question_title: question.title.clone(),
        question_type: QuestionType::Standard,
        total_score,
        max_score,
        percentage: config.percentage(total_score, max_score),
        sub_question_scores,
    }
}

/// Sum of [`question_max_score`] over `questions`.
pub fn section_max_score(questions: &[Question], config: &ScoringConfig) -> f64 {
    config.round_score(questions.iter().map(|q| question_max_score(q, config)).sum())
}

pub fn section_score(section: &Section, config: &ScoringConfig) -> SectionScore {
    let question_scores = section
        .questions
        .iter()
        .map(|q| question_score(q, config))
        .collect();
    SectionScore::from_questions(section, question_scores, config)
}

pub fn checklist_max_score(checklist: &Checklist, config: &ScoringConfig) -> f64 {
    config.round_score(
        checklist
            .sections
            .iter()
            .map(|s| section_max_score(&s.questions, config))
            .sum(),
    )
}

pub fn checklist_scores(checklist: &Checklist, config: &ScoringConfig) -> ChecklistScores {
    let sections = checklist
        .sections
        .iter()
        .map(|s| section_score(s, config))
        .collect();
    ChecklistScores::from_sections(sections, config)
}

/// Copy of `section` with its cached `score`/`max_score` refreshed.
pub fn recalculate_section(section: &Section, config: &ScoringConfig) -> Section {
    let scores = section_score(section, config);
    Section {
        score: scores.total_score,
        max_score: scores.max_score,
        ..section.clone()
    }
}

/// Copy of `checklist` with every section's cached totals refreshed.
pub fn recalculate_checklist(checklist: &Checklist, config: &ScoringConfig) -> Checklist {
    Checklist {
        sections: checklist
            .sections
            .iter()
            .map(|s| recalculate_section(s, config))
            .collect(),
        ..checklist.clone()
    }
}
