pub mod config;
pub mod engine;
pub mod grade;
pub mod responses;
pub mod validation;

pub use config::*;
pub use engine::{
    checklist_max_score, checklist_scores, question_max_score, question_score,
    recalculate_checklist, recalculate_section, section_max_score, section_score,
    ChecklistScores, QuestionScore, ScoreCalculation, SectionScore,
};
pub use grade::{grade, recommendations, Grade, LetterGrade, Recommendations};
pub use validation::{validate_score, validate_scoring, ScoreValidation};

#[cfg(test)]
mod proptests;
