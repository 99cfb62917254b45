//! Property tests over randomly generated checklists.

use proptest::prelude::*;

use super::*;
use crate::checklist::{
    Checklist, Question, QuestionResponse, ResponseOption, Section, StandardQuestion,
};

fn arb_standard(depth: u32) -> BoxedStrategy<StandardQuestion> {
    let leaf = ("[a-z]{4}", 0u8..=10).prop_map(|(id, score)| StandardQuestion {
        id,
        title: "Question".to_string(),
        score: score as f64,
        max_score: 10.0,
        sub_questions: vec![],
    });
    if depth == 0 {
        return leaf.boxed();
    }
    (leaf, prop::collection::vec(arb_standard(depth - 1), 0..3))
        .prop_map(|(mut q, subs)| {
            q.sub_questions = subs;
            q
        })
        .boxed()
}

fn arb_section() -> impl Strategy<Value = Section> {
    ("[a-z]{3}", prop::collection::vec(arb_standard(1), 0..5)).prop_map(|(id, questions)| Section {
        id,
        title: "Section".to_string(),
        score: 0.0,
        max_score: 0.0,
        questions: questions.into_iter().map(Question::Standard).collect(),
    })
}

fn arb_checklist() -> impl Strategy<Value = Checklist> {
    prop::collection::vec(arb_section(), 0..4)
        .prop_map(|sections| Checklist::new("Primary Care", "Regional", "Emergency", sections))
}

fn arb_config() -> impl Strategy<Value = ScoringConfig> {
    (any::<bool>(), 1u8..=20).prop_map(|(enable_weighting, max)| ScoringConfig {
        enable_weighting,
        default_max_score: max as f64,
        ..Default::default()
    })
}

fn responses_for(checklist: &Checklist, picks: &[u8]) -> Vec<QuestionResponse> {
    checklist
        .sections
        .iter()
        .flat_map(|s| s.questions.iter())
        .zip(picks.iter().cycle())
        .filter_map(|(q, pick)| {
            let response = match pick % 4 {
                0 => ResponseOption::Yes,
                1 => ResponseOption::No,
                2 => ResponseOption::Na,
                _ => return None,
            };
            Some(QuestionResponse {
                question_id: q.id().to_string(),
                response,
                notes: None,
            })
        })
        .collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

proptest! {
    #[test]
    fn checklist_totals_are_section_sums(checklist in arb_checklist(), config in arb_config()) {
        let scores = checklist_scores(&checklist, &config);
        let section_max: f64 = checklist
            .sections
            .iter()
            .map(|s| section_max_score(&s.questions, &config))
            .sum();
        let section_total: f64 = scores.sections.iter().map(|s| s.total_score).sum();

        prop_assert!(close(checklist_max_score(&checklist, &config), section_max));
        prop_assert!(close(scores.overall.max_score, section_max));
        prop_assert!(close(scores.overall.total_score, section_total));
    }

    #[test]
    fn response_totals_are_section_sums(
        checklist in arb_checklist(),
        picks in prop::collection::vec(any::<u8>(), 1..20),
    ) {
        let config = ScoringConfig::default();
        let responses = responses_for(&checklist, &picks);
        let scores = responses::checklist_scores(&checklist, &responses, &config);
        let section_max: f64 = checklist
            .sections
            .iter()
            .map(|s| responses::section_max_score(&s.questions, &responses, &config))
            .sum();
        let section_total: f64 = scores.sections.iter().map(|s| s.total_score).sum();

        prop_assert!(close(responses::checklist_max_score(&checklist, &responses, &config), section_max));
        prop_assert!(close(scores.overall.total_score, section_total));
    }

    #[test]
    fn percentage_within_bounds(max in 0.0f64..10_000.0, frac in 0.0f64..=1.0, places in 0u32..=4) {
        let config = ScoringConfig { decimal_places: places, ..Default::default() };
        let score = max * frac;
        let pct = config.percentage(score, max);
        prop_assert!((0.0..=100.0).contains(&pct));
        if max == 0.0 {
            prop_assert_eq!(pct, 0.0);
        }
    }

    #[test]
    fn validate_score_clamps(score in -1e6f64..1e6, max in 0.0f64..1e4) {
        let result = validate_score(score, max, &ScoringConfig::default());
        prop_assert!(result.adjusted_score >= 0.0);
        prop_assert!(result.adjusted_score <= max);
        prop_assert_eq!(result.is_valid, result.warning.is_none());
    }

    #[test]
    fn grade_is_monotonic(a in -10.0f64..110.0, b in -10.0f64..110.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(grade(low).grade <= grade(high).grade);
    }

    #[test]
    fn rounding_is_idempotent(x in -1e6f64..1e6, places in 0u32..=4) {
        let config = ScoringConfig { decimal_places: places, ..Default::default() };
        let once = config.round_score(x);
        prop_assert_eq!(config.round_score(once), once);
    }
}

#[test]
fn empty_section_scores_zero_in_both_models() {
    let config = ScoringConfig::default();
    let section = Section {
        id: "s1".to_string(),
        title: "Empty".to_string(),
        score: 0.0,
        max_score: 0.0,
        questions: vec![],
    };

    assert_eq!(section_max_score(&section.questions, &config), 0.0);
    assert_eq!(section_score(&section, &config).percentage, 0.0);
    assert_eq!(responses::section_max_score(&section.questions, &[], &config), 0.0);
    assert_eq!(responses::section_score(&section, &[], &config).percentage, 0.0);
}
