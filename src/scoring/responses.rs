//! Yes/No/NA scoring: points come from recorded responses, not from the
//! questions themselves. NA answers drop out of both score and maximum.

use super::config::ScoringConfig;
use super::engine::{ChecklistScores, QuestionScore, SectionScore};
use crate::checklist::{
    Checklist, Question, QuestionResponse, QuestionType, ResponseOption, Section, StandardQuestion,
};

/// (score, max) contributed by a single response.
fn contribution(response: Option<&QuestionResponse>) -> (f64, f64) {
    match response.map(|r| r.response) {
        Some(ResponseOption::Yes) => (1.0, 1.0),
        Some(ResponseOption::No) => (0.0, 1.0),
        Some(ResponseOption::Na) | None => (0.0, 0.0),
    }
}

/// Maximum a question can contribute: 1 when answered yes or no, else 0.
pub fn question_max_score(response: Option<&QuestionResponse>) -> f64 {
    contribution(response).1
}

/// Responses that answer one of `questions` (top-level ids only).
pub fn responses_for<'a>(
    questions: &[Question],
    responses: &'a [QuestionResponse],
) -> Vec<&'a QuestionResponse> {
    responses
        .iter()
        .filter(|r| questions.iter().any(|q| q.id() == r.question_id))
        .collect()
}

fn find_response<'a>(
    question_id: &str,
    responses: &[&'a QuestionResponse],
) -> Option<&'a QuestionResponse> {
    responses.iter().copied().find(|r| r.question_id == question_id)
}

/// Count of non-NA responses that belong to `questions`.
pub fn section_max_score(
    questions: &[Question],
    responses: &[QuestionResponse],
    config: &ScoringConfig,
) -> f64 {
    let answered = responses_for(questions, responses)
        .into_iter()
        .filter(|r| r.response != ResponseOption::Na)
        .count();
    config.round_score(answered as f64)
}

/// Score a question against its response.
///
/// Sub-questions have no responses of their own and are scored against the
/// parent's response; their totals and maxima are added to the parent's.
pub fn question_score(
    question: &Question,
    response: Option<&QuestionResponse>,
    config: &ScoringConfig,
) -> QuestionScore {
    match question {
        Question::Standard(q) => standard_score(q, response, config),
        Question::DataControl(q) => leaf_score(
            &q.id,
            &q.title,
            QuestionType::DataControl,
            response,
            config,
        ),
    }
}

fn leaf_score(
    id: &str,
    title: &str,
    question_type: QuestionType,
    response: Option<&QuestionResponse>,
    config: &ScoringConfig,
) -> QuestionScore {
    let (total_score, max_score) = contribution(response);
    QuestionScore {
        question_id: id.to_string(),
        question_title: title.to_string(),
        question_type,
        total_score,
        max_score,
        percentage: config.percentage(total_score, max_score),
        sub_question_scores: Vec::new(),
    }
}

fn standard_score(
    question: &StandardQuestion,
    response: Option<&QuestionResponse>,
    config: &ScoringConfig,
) -> QuestionScore {
    let mut score = leaf_score(
        &question.id,
        &question.title,
        QuestionType::Standard,
        response,
        config,
    );
    if question.sub_questions.is_empty() {
        return score;
    }

    score.sub_question_scores = question
        .sub_questions
        .iter()
        .map(|sub| standard_score(sub, response, config))
        .collect();
    let sub_total: f64 = score.sub_question_scores.iter().map(|s| s.total_score).sum();
    let sub_max: f64 = score.sub_question_scores.iter().map(|s| s.max_score).sum();

    score.total_score = config.round_score(score.total_score + sub_total);
    score.max_score = config.round_score(score.max_score + sub_max);
    score.percentage = config.percentage(score.total_score, score.max_score);
    score
}

/// Score a section, pairing each question with the first response for its id.
///
/// Only answered questions (non-zero maximum) count. Each answered top-level
/// question adds one point of maximum while its total still includes the
/// sub-question points, so the percentage can exceed 100.
pub fn section_score(
    section: &Section,
    responses: &[QuestionResponse],
    config: &ScoringConfig,
) -> SectionScore {
    let section_responses = responses_for(&section.questions, responses);
    let question_scores: Vec<QuestionScore> = section
        .questions
        .iter()
        .map(|q| question_score(q, find_response(q.id(), &section_responses), config))
        .collect();

    let answered = question_scores.iter().filter(|q| q.max_score > 0.0);
    let (total, count) = answered.fold((0.0, 0usize), |(total, count), q| {
        (total + q.total_score, count + 1)
    });
    let total_score = config.round_score(total);
    let max_score = config.round_score(count as f64);
    SectionScore {
        section_id: section.id.clone(),
        section_title: section.title.clone(),
        total_score,
        max_score,
        percentage: config.percentage(total_score, max_score),
        question_scores,
    }
}

pub fn checklist_max_score(
    checklist: &Checklist,
    responses: &[QuestionResponse],
    config: &ScoringConfig,
) -> f64 {
    config.round_score(
        checklist
            .sections
            .iter()
            .map(|s| section_max_score(&s.questions, responses, config))
            .sum(),
    )
}

pub fn checklist_scores(
    checklist: &Checklist,
    responses: &[QuestionResponse],
    config: &ScoringConfig,
) -> ChecklistScores {
    let sections = checklist
        .sections
        .iter()
        .map(|s| section_score(s, responses, config))
        .collect();
    ChecklistScores::from_sections(sections, config)
}

/// Copy of `section` with `max_score` set from the answered responses.
pub fn update_section_max_score(
    section: &Section,
    responses: &[QuestionResponse],
    config: &ScoringConfig,
) -> Section {
    Section {
        max_score: section_max_score(&section.questions, responses, config),
        ..section.clone()
    }
}

pub fn update_checklist_max_scores(
    checklist: &Checklist,
    responses: &[QuestionResponse],
    config: &ScoringConfig,
) -> Checklist {
    Checklist {
        sections: checklist
            .sections
            .iter()
            .map(|s| update_section_max_score(s, responses, config))
            .collect(),
        ..checklist.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(id: &str, subs: Vec<StandardQuestion>) -> StandardQuestion {
        StandardQuestion {
            id: id.to_string(),
            title: format!("Question {}", id),
            score: 0.0,
            max_score: 0.0,
            sub_questions: subs,
        }
    }

    fn question(id: &str) -> Question {
        Question::Standard(standard(id, vec![]))
    }

    fn response(id: &str, option: ResponseOption) -> QuestionResponse {
        QuestionResponse {
            question_id: id.to_string(),
            response: option,
            notes: None,
        }
    }

    fn section(id: &str, questions: Vec<Question>) -> Section {
        Section {
            id: id.to_string(),
            title: format!("Section {}", id),
            score: 0.0,
            max_score: 0.0,
            questions,
        }
    }

    #[test]
    fn test_yes_no_na_section() {
        let config = ScoringConfig::default();
        let s = section("s1", vec![question("q1"), question("q2"), question("q3")]);
        let responses = vec![
            response("q1", ResponseOption::Yes),
            response("q2", ResponseOption::No),
            response("q3", ResponseOption::Na),
        ];

        assert_eq!(section_max_score(&s.questions, &responses, &config), 2.0);
        let score = section_score(&s, &responses, &config);
        assert_eq!(score.total_score, 1.0);
        assert_eq!(score.max_score, 2.0);
        assert_eq!(score.percentage, 50.0);
    }

    #[test]
    fn test_question_contributions() {
        let config = ScoringConfig::default();
        let q = question("q1");

        let yes = response("q1", ResponseOption::Yes);
        let no = response("q1", ResponseOption::No);
        let na = response("q1", ResponseOption::Na);

        assert_eq!(question_max_score(Some(&yes)), 1.0);
        assert_eq!(question_max_score(Some(&no)), 1.0);
        assert_eq!(question_max_score(Some(&na)), 0.0);
        assert_eq!(question_max_score(None), 0.0);

        assert_eq!(question_score(&q, Some(&yes), &config).total_score, 1.0);
        assert_eq!(question_score(&q, Some(&yes), &config).percentage, 100.0);
        assert_eq!(question_score(&q, Some(&no), &config).total_score, 0.0);
        assert_eq!(question_score(&q, Some(&na), &config).percentage, 0.0);
    }

    #[test]
    fn test_unanswered_question_counts_nothing() {
        let config = ScoringConfig::default();
        let s = section("s1", vec![question("q1"), question("q2")]);
        let responses = vec![response("q1", ResponseOption::Yes)];

        assert_eq!(section_max_score(&s.questions, &responses, &config), 1.0);
        let score = section_score(&s, &responses, &config);
        assert_eq!(score.total_score, 1.0);
        assert_eq!(score.max_score, 1.0);
        assert_eq!(score.percentage, 100.0);
    }

    #[test]
    fn test_sub_questions_share_parent_response() {
        let config = ScoringConfig::default();
        let q = Question::Standard(standard("q1", vec![standard("sq1", vec![]), standard("sq2", vec![])]));

        let yes = response("q1", ResponseOption::Yes);
        let score = question_score(&q, Some(&yes), &config);
        assert_eq!(score.total_score, 3.0);
        assert_eq!(score.max_score, 3.0);
        assert_eq!(score.sub_question_scores.len(), 2);
        assert_eq!(score.sub_question_scores[0].total_score, 1.0);

        let na = response("q1", ResponseOption::Na);
        let score = question_score(&q, Some(&na), &config);
        assert_eq!(score.total_score, 0.0);
        assert_eq!(score.max_score, 0.0);
        assert_eq!(score.percentage, 0.0);
    }

    #[test]
    fn test_section_max_counts_answered_top_level_questions() {
        let config = ScoringConfig::default();
        let parent = Question::Standard(standard("q1", vec![standard("sq1", vec![]), standard("sq2", vec![])]));
        let s = section("s1", vec![parent, question("q2")]);
        let responses = vec![
            response("q1", ResponseOption::Yes),
            response("q2", ResponseOption::Na),
        ];

        let score = section_score(&s, &responses, &config);
        assert_eq!(score.total_score, 3.0);
        assert_eq!(score.max_score, 1.0);
        assert_eq!(score.max_score, section_max_score(&s.questions, &responses, &config));
        assert_eq!(score.percentage, 300.0);
        assert_eq!(score.question_scores.len(), 2);
        assert_eq!(score.question_scores[0].max_score, 3.0);
    }

    #[test]
    fn test_responses_for_other_sections_ignored() {
        let config = ScoringConfig::default();
        let s = section("s1", vec![question("q1")]);
        let responses = vec![
            response("q1", ResponseOption::No),
            response("elsewhere", ResponseOption::Yes),
        ];

        assert_eq!(section_max_score(&s.questions, &responses, &config), 1.0);
        assert_eq!(section_score(&s, &responses, &config).total_score, 0.0);
    }

    #[test]
    fn test_first_response_wins() {
        let config = ScoringConfig::default();
        let s = section("s1", vec![question("q1")]);
        let responses = vec![
            response("q1", ResponseOption::Yes),
            response("q1", ResponseOption::No),
        ];
        assert_eq!(section_score(&s, &responses, &config).total_score, 1.0);
    }

    #[test]
    fn test_empty_section_is_zero() {
        let config = ScoringConfig::default();
        let s = section("s1", vec![]);
        let responses = vec![response("q1", ResponseOption::Yes)];

        assert_eq!(section_max_score(&s.questions, &responses, &config), 0.0);
        let score = section_score(&s, &responses, &config);
        assert_eq!(score.max_score, 0.0);
        assert_eq!(score.percentage, 0.0);
    }

    #[test]
    fn test_checklist_sums_sections() {
        let config = ScoringConfig::default();
        let checklist = Checklist::new(
            "Primary Care",
            "Regional",
            "Emergency",
            vec![
                section("s1", vec![question("q1"), question("q2")]),
                section("s2", vec![question("q3"), question("q4")]),
            ],
        );
        let responses = vec![
            response("q1", ResponseOption::Yes),
            response("q2", ResponseOption::Yes),
            response("q3", ResponseOption::No),
            response("q4", ResponseOption::Na),
        ];

        let scores = checklist_scores(&checklist, &responses, &config);
        assert_eq!(scores.sections[0].percentage, 100.0);
        assert_eq!(scores.sections[1].percentage, 0.0);
        assert_eq!(scores.overall.total_score, 2.0);
        assert_eq!(scores.overall.max_score, 3.0);
        assert_eq!(scores.overall.percentage, 66.67);
        assert_eq!(checklist_max_score(&checklist, &responses, &config), 3.0);
    }

    #[test]
    fn test_update_checklist_max_scores() {
        let config = ScoringConfig::default();
        let checklist = Checklist::new(
            "P",
            "L",
            "D",
            vec![section("s1", vec![question("q1"), question("q2")])],
        );
        let responses = vec![
            response("q1", ResponseOption::Yes),
            response("q2", ResponseOption::Na),
        ];

        let updated = update_checklist_max_scores(&checklist, &responses, &config);
        assert_eq!(updated.sections[0].max_score, 1.0);
        assert_eq!(updated.sections[0].score, 0.0);
        assert_eq!(updated.id, checklist.id);
    }
}
