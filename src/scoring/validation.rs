use serde::Serialize;

use super::config::ScoringConfig;

/// Places beyond this are rejected at startup; 10^dp stops being exact.
const MAX_DECIMAL_PLACES: u32 = 10;

/// Result of checking a captured score against its bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreValidation {
    pub is_valid: bool,
    pub adjusted_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Round `score` and clamp it into `[0, max_score]`.
/// Out-of-range input is adjusted and flagged, never rejected.
pub fn validate_score(score: f64, max_score: f64, config: &ScoringConfig) -> ScoreValidation {
    let adjusted = config.round_score(score);

    if adjusted < 0.0 {
        return ScoreValidation {
            is_valid: false,
            adjusted_score: 0.0,
            warning: Some("Score cannot be negative. Adjusted to 0.".to_string()),
        };
    }

    if adjusted > max_score {
        return ScoreValidation {
            is_valid: false,
            adjusted_score: max_score,
            warning: Some(format!(
                "Score exceeds maximum ({}). Adjusted to maximum.",
                max_score
            )),
        };
    }

    ScoreValidation {
        is_valid: true,
        adjusted_score: adjusted,
        warning: None,
    }
}

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(config.default_max_score > 0.0) {
        errors.push("scoring.default_max_score: must be positive".to_string());
    }

    let weights = [
        ("standard_question", config.weights.standard_question),
        ("data_control_question", config.weights.data_control_question),
        ("sub_question_multiplier", config.weights.sub_question_multiplier),
    ];
    for (name, value) in weights {
        if !(value >= 0.0) {
            errors.push(format!("scoring.weights.{}: must be non-negative", name));
        }
    }

    if config.decimal_places > MAX_DECIMAL_PLACES {
        errors.push(format!(
            "scoring.decimal_places: must be at most {}",
            MAX_DECIMAL_PLACES
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringWeights;

    #[test]
    fn test_score_exceeds_maximum() {
        let result = validate_score(15.0, 10.0, &ScoringConfig::default());
        assert!(!result.is_valid);
        assert_eq!(result.adjusted_score, 10.0);
        assert!(result.warning.unwrap().contains("exceeds maximum"));
    }

    #[test]
    fn test_negative_score() {
        let result = validate_score(-3.0, 10.0, &ScoringConfig::default());
        assert!(!result.is_valid);
        assert_eq!(result.adjusted_score, 0.0);
        assert!(result.warning.unwrap().contains("negative"));
    }

    #[test]
    fn test_score_in_range() {
        let result = validate_score(7.456, 10.0, &ScoringConfig::default());
        assert!(result.is_valid);
        assert_eq!(result.adjusted_score, 7.46);
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let config = ScoringConfig::default();
        assert!(validate_score(0.0, 10.0, &config).is_valid);
        assert!(validate_score(10.0, 10.0, &config).is_valid);
    }

    #[test]
    fn test_rounding_applies_before_bounds() {
        // 10.001 rounds to 10.0 and is therefore within bounds
        let result = validate_score(10.001, 10.0, &ScoringConfig::default());
        assert!(result.is_valid);
        assert_eq!(result.adjusted_score, 10.0);
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_non_positive_default_max() {
        let config = ScoringConfig {
            default_max_score: 0.0,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("default_max_score"));
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            weights: ScoringWeights {
                data_control_question: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors, vec!["scoring.weights.data_control_question: must be non-negative"]);
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            default_max_score: -10.0,
            decimal_places: 30,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
